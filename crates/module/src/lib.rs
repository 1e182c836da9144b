//! Project Forward host integration.
//!
//! Adapts the pure `forward-domain` types to the host application: the
//! startup hooks, the data model and sheet registrations, the actor document
//! wrapper, and the character sheet shell. The host API is injected through
//! [`HostPort`]; nothing here reaches for a global.

pub mod document;
pub mod hooks;
pub mod ids;
pub mod module;
pub mod ports;
pub mod settings;
pub mod sheet;

pub use document::{ActorDocument, DocumentError, CHARACTER_TYPE};
pub use hooks::{HookError, HookFailure, HookPhase, Lifecycle, ModuleHooks};
pub use ids::ActorId;
pub use module::ForwardModule;
pub use ports::{DataModelRegistration, HostError, HostPort, SheetRegistration};
pub use settings::{ModuleSettings, MODULE_ID};
pub use sheet::{
    CharacterSheetApplication, FieldView, SectionView, SheetData, SheetOptionOverrides,
    SheetOptions, SheetView,
};

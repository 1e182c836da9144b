//! Project Forward domain: the character schema, its validation routine, and
//! the record type the host persists per character document.
//!
//! Pure and synchronous. Nothing here performs I/O, logs, or reaches for the
//! host; the integration layer in `forward-module` wraps these types.

pub mod character;
pub mod character_sheet;
pub mod error;
pub mod schema;
pub mod validate;
pub mod value_objects;

pub use character::{
    Ability, Attributes, CharacterRecord, FieldUpdate, Health, SkillKind, Skills,
};
pub use character_sheet::{SectionType, SheetField, SheetFieldType, SheetLayout, SheetSection};
pub use error::DomainError;
pub use schema::{describe_schema, FieldDescriptor, FieldType, Scalar, CHARACTER_SCHEMA};
pub use validate::{validate_field, validate_record};
pub use value_objects::CharacterName;

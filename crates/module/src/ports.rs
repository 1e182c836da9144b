//! Port traits for the host boundary.
//!
//! The host application is the only collaborator this module talks to, and it
//! is reached exclusively through [`HostPort`]. Nothing here touches an ambient
//! host namespace: the host API is passed in by whoever drives the lifecycle.

use forward_domain::{describe_schema, FieldDescriptor, CHARACTER_SCHEMA};

use crate::sheet::SheetOptions;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("Registration rejected: {0}")]
    Rejected(String),
    #[error("Already registered: {0}")]
    Duplicate(String),
}

// =============================================================================
// Registrations
// =============================================================================

/// Binds a record schema to a document type key (e.g. `"character"`).
#[derive(Debug, Clone, PartialEq)]
pub struct DataModelRegistration {
    pub document_type: String,
    pub schema: &'static [FieldDescriptor],
}

impl DataModelRegistration {
    /// The character record schema under the given document type
    pub fn character(document_type: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            schema: CHARACTER_SCHEMA,
        }
    }

    /// Schema as JSON, in the shape the host reads field options from
    pub fn describe(&self) -> serde_json::Value {
        describe_schema(self.schema)
    }
}

/// Registers a sheet application for one or more document types.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRegistration {
    /// Owning module ID
    pub module_id: String,
    /// Name the host lists the sheet under
    pub sheet_class: String,
    pub types: Vec<String>,
    /// Whether this sheet replaces the host default for `types`
    pub make_default: bool,
    pub options: SheetOptions,
}

// =============================================================================
// Host Port
// =============================================================================

/// Host application API used during the lifecycle hooks.
///
/// Both registrations are one-time, fire-and-forget calls.
#[cfg_attr(test, mockall::automock)]
pub trait HostPort {
    fn register_data_model(&self, registration: DataModelRegistration) -> Result<(), HostError>;

    fn register_sheet(&self, registration: SheetRegistration) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_registration_uses_character_schema() {
        let registration = DataModelRegistration::character("character");
        assert_eq!(registration.document_type, "character");
        assert_eq!(registration.schema.len(), 6);
        assert_eq!(registration.describe()["level"]["min"], 1);
    }
}

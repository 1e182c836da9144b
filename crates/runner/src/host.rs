//! In-process host used by the runner.
//!
//! Records registrations the way the real host would and rejects duplicates,
//! so a module can be exercised end to end without the host application.

use std::cell::RefCell;
use std::collections::BTreeMap;

use forward_module::{DataModelRegistration, HostError, HostPort, SheetRegistration};

#[derive(Debug, Default)]
pub struct LocalHost {
    data_models: RefCell<BTreeMap<String, DataModelRegistration>>,
    sheets: RefCell<Vec<SheetRegistration>>,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data model registered for a document type
    pub fn data_model(&self, document_type: &str) -> Option<DataModelRegistration> {
        self.data_models.borrow().get(document_type).cloned()
    }

    /// Most recently registered default sheet for a document type
    pub fn default_sheet(&self, document_type: &str) -> Option<SheetRegistration> {
        self.sheets
            .borrow()
            .iter()
            .rev()
            .find(|s| s.make_default && s.types.iter().any(|t| t == document_type))
            .cloned()
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.borrow().len()
    }
}

impl HostPort for LocalHost {
    fn register_data_model(&self, registration: DataModelRegistration) -> Result<(), HostError> {
        let mut models = self.data_models.borrow_mut();
        if models.contains_key(&registration.document_type) {
            return Err(HostError::Duplicate(format!(
                "data model for '{}'",
                registration.document_type
            )));
        }
        tracing::info!(
            document_type = %registration.document_type,
            fields = registration.schema.len(),
            "Registered data model"
        );
        models.insert(registration.document_type.clone(), registration);
        Ok(())
    }

    fn register_sheet(&self, registration: SheetRegistration) -> Result<(), HostError> {
        if registration.types.is_empty() {
            return Err(HostError::Rejected(format!(
                "sheet '{}' lists no document types",
                registration.sheet_class
            )));
        }
        let mut sheets = self.sheets.borrow_mut();
        if sheets.iter().any(|s| {
            s.module_id == registration.module_id && s.sheet_class == registration.sheet_class
        }) {
            return Err(HostError::Duplicate(format!(
                "sheet '{}' from '{}'",
                registration.sheet_class, registration.module_id
            )));
        }
        tracing::info!(
            module_id = %registration.module_id,
            sheet_class = %registration.sheet_class,
            types = ?registration.types,
            make_default = registration.make_default,
            "Registered sheet"
        );
        sheets.push(registration);
        Ok(())
    }
}

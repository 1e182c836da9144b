//! The Project Forward module: what it does in each startup hook.

use crate::hooks::{HookError, ModuleHooks};
use crate::ports::{DataModelRegistration, HostPort, SheetRegistration};
use crate::settings::ModuleSettings;
use crate::sheet::{CharacterSheetApplication, SheetOptions};

/// Registers the character data model and sheet during `init`.
#[derive(Debug, Clone, Default)]
pub struct ForwardModule {
    settings: ModuleSettings,
}

impl ForwardModule {
    pub fn new(settings: ModuleSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ModuleSettings {
        &self.settings
    }

    /// Sheet options after applying configured overrides
    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions::default().merge(&self.settings.sheet)
    }

    /// A fresh sheet application with this module's options
    pub fn sheet_application(&self) -> CharacterSheetApplication {
        CharacterSheetApplication::new(self.sheet_options())
    }
}

impl ModuleHooks for ForwardModule {
    fn init(&mut self, host: &dyn HostPort) -> Result<(), HookError> {
        tracing::info!(module_id = %self.settings.module_id, "Initializing module");

        host.register_data_model(DataModelRegistration::character(
            self.settings.document_type.clone(),
        ))?;

        host.register_sheet(SheetRegistration {
            module_id: self.settings.module_id.clone(),
            sheet_class: CharacterSheetApplication::SHEET_CLASS.to_string(),
            types: vec![self.settings.document_type.clone()],
            make_default: true,
            options: self.sheet_options(),
        })?;

        tracing::debug!(
            module_id = %self.settings.module_id,
            document_type = %self.settings.document_type,
            "Registered character data model and sheet"
        );
        Ok(())
    }

    fn setup(&mut self, _host: &dyn HostPort) -> Result<(), HookError> {
        tracing::info!(module_id = %self.settings.module_id, "Setting up module");
        Ok(())
    }

    fn ready(&mut self, _host: &dyn HostPort) -> Result<(), HookError> {
        tracing::info!(module_id = %self.settings.module_id, "Module ready");
        Ok(())
    }
}

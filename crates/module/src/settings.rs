//! Module settings
//!
//! Read from environment variables with defaults. Unparseable numbers are
//! logged and ignored rather than failing startup.

use crate::document::CHARACTER_TYPE;
use crate::sheet::SheetOptionOverrides;

/// Default module ID the host knows this module by
pub const MODULE_ID: &str = "project-forward";

pub const ENV_MODULE_ID: &str = "FORWARD_MODULE_ID";
pub const ENV_SHEET_TITLE: &str = "FORWARD_SHEET_TITLE";
pub const ENV_SHEET_WIDTH: &str = "FORWARD_SHEET_WIDTH";
pub const ENV_SHEET_HEIGHT: &str = "FORWARD_SHEET_HEIGHT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSettings {
    pub module_id: String,
    /// Document type the character schema and sheet are registered for
    pub document_type: String,
    pub sheet: SheetOptionOverrides,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            module_id: MODULE_ID.to_string(),
            document_type: CHARACTER_TYPE.to_string(),
            sheet: SheetOptionOverrides::default(),
        }
    }
}

impl ModuleSettings {
    /// Settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut settings = Self::default();
        if let Some(module_id) = get(ENV_MODULE_ID) {
            settings.module_id = module_id;
        }
        settings.sheet.title = get(ENV_SHEET_TITLE);
        settings.sheet.width =
            get(ENV_SHEET_WIDTH).and_then(|v| parse_dimension(ENV_SHEET_WIDTH, &v));
        settings.sheet.height =
            get(ENV_SHEET_HEIGHT).and_then(|v| parse_dimension(ENV_SHEET_HEIGHT, &v));
        settings
    }
}

fn parse_dimension(key: &str, raw: &str) -> Option<u32> {
    match raw.parse::<u32>() {
        Ok(0) | Err(_) => {
            tracing::warn!(key, value = raw, "Ignoring invalid sheet dimension");
            None
        }
        Ok(value) => Some(value),
    }
}

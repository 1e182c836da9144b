//! Runner configuration from the environment.

use std::path::PathBuf;

use forward_module::ModuleSettings;

pub const ENV_CHARACTER_PATH: &str = "FORWARD_CHARACTER_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub settings: ModuleSettings,
    /// Character file to validate and render after startup
    pub character_path: Option<PathBuf>,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let character_path = lookup(ENV_CHARACTER_PATH)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Self {
            settings: ModuleSettings::from_lookup(&lookup),
            character_path,
        }
    }
}

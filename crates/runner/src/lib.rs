//! Project Forward Runner - composition root.
//!
//! Wires the module to an in-process host, drives the startup hooks, and
//! optionally validates and renders one character file.

pub mod config;
pub mod host;
pub mod load;

use chrono::Utc;

use forward_module::{ForwardModule, HookFailure, Lifecycle, SheetView};

pub use config::RunnerConfig;
pub use host::LocalHost;
pub use load::{load_character, LoadError};

/// Result of one runner pass
#[derive(Debug)]
pub struct RunReport {
    pub failures: Vec<HookFailure>,
    /// Normalized actor JSON, when a character file was given
    pub actor_json: Option<String>,
    pub view: Option<SheetView>,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Document(#[from] forward_module::DocumentError),
}

/// Run startup against `host`, then load and render the configured character.
pub fn run(config: &RunnerConfig, host: &LocalHost) -> Result<RunReport, RunError> {
    let mut module = ForwardModule::new(config.settings.clone());
    let failures = Lifecycle::new().run_startup(&mut module, host);
    for failure in &failures {
        tracing::warn!(phase = %failure.phase, error = %failure.error, "Startup hook failed");
    }

    let mut report = RunReport {
        failures,
        actor_json: None,
        view: None,
    };

    let Some(path) = &config.character_path else {
        return Ok(report);
    };

    let actor = load_character(path, Utc::now())?;
    tracing::info!(actor_id = %actor.id(), name = %actor.name(), "Character is valid");
    report.actor_json = Some(actor.to_json()?);

    let mut sheet = module.sheet_application();
    sheet.bind(actor);
    report.view = sheet.render();
    Ok(report)
}

//! Project Forward Runner - main entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forward_runner::{run, LocalHost, RunnerConfig};

fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the runner may be started from `crates/runner`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forward_module=debug,forward_runner=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Project Forward runner");

    let config = RunnerConfig::from_env();
    let host = LocalHost::new();
    let report = run(&config, &host)?;

    if !report.failures.is_empty() {
        anyhow::bail!("{} startup hook(s) failed", report.failures.len());
    }

    if let Some(json) = report.actor_json {
        println!("{json}");
    }
    if let Some(view) = report.view {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

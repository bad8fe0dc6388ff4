use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod models;
pub use models::*;

static DOTENV_LOADED: OnceCell<()> = OnceCell::new();

/// Loads `.env` exactly once per process; later calls are no-ops.
pub fn ensure_dotenv_loaded() {
    DOTENV_LOADED.get_or_init(|| {
        // Missing .env files are fine; env vars may come from the shell.
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default.*` at the workspace root
/// 2. `config/{RUN_ENV}.*` (RUN_ENV defaults to "debug")
/// 3. Environment variables prefixed with `TUTORLINK` and nested by `__`,
///    e.g. `TUTORLINK_AVAILABILITY__SCHEDULE_PATH`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());

    let manifest_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()),
    );
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2) // go from crates/tutorlink_config to workspace root
        .unwrap_or(&manifest_dir)
        .to_path_buf();

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_str().unwrap_or("config/default")).required(false))
        .add_source(File::with_name(env_path.to_str().unwrap_or("config/debug")).required(false))
        .add_source(Environment::with_prefix("TUTORLINK").separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_reads_workspace_defaults() {
        let config = load_config().expect("default config should load");
        assert!(!config.availability.schedule_path.is_empty());
        assert!(!config.availability.default_template_hours.is_empty());
    }

    #[test]
    fn test_template_hours_default_is_business_hours() {
        let availability = AvailabilityConfig::default();
        assert_eq!(availability.default_template_hours.len(), 6);
        assert_eq!(availability.default_template_hours[0], "09:00");
    }
}

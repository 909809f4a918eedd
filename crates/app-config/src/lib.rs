// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, JournalSettings, Settings};

/// Loads the application settings from `config/` in the working directory.
///
/// The environment name comes from `APP_ENVIRONMENT` and defaults to "development".
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads and validates settings from `config_dir`.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables (e.g., `APP_RISK__MAX_LEVERAGE=2`).
///
/// A risk or execution section that breaks its invariants is an error here, at
/// startup, rather than at the first trade.
pub fn load_settings_from(config_dir: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&config_dir.join("base").to_string_lossy()))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&config_dir.join(environment).to_string_lossy()).required(false))
        // 3. Load settings from environment variables.
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    settings.risk.validate()?;
    settings.execution.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::tempdir;

    const BASE: &str = r#"
[app]
environment = "development"
log_level = "debug"

[risk]
risk_percent = 0.0025
daily_loss_cap_percent = 0.01
max_consecutive_losses = 3
max_open_risk_percent = 0.0075
max_leverage = 3.0

[journal]
log_dir = "var/journal"
"#;

    #[test]
    fn loads_base_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let settings = load_settings_from(dir.path(), "test-missing").unwrap();
        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.risk.risk_percent, dec!(0.0025));
        assert_eq!(settings.risk.max_leverage, dec!(3));
        assert_eq!(settings.journal.log_dir, "var/journal");
        assert_eq!(settings.execution.confirmation_phrase, "CONFIRM");
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        fs::write(
            dir.path().join("production.toml"),
            "[app]\nenvironment = \"production\"\n\n[risk]\nmax_leverage = 2.0\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), "production").unwrap();
        assert_eq!(settings.app.environment, "production");
        assert_eq!(settings.risk.max_leverage, dec!(2));
        assert_eq!(settings.risk.risk_percent, dec!(0.0025));
    }

    #[test]
    fn invalid_risk_section_fails_at_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        fs::write(dir.path().join("broken.toml"), "[risk]\nmax_leverage = 0.0\n").unwrap();

        let err = load_settings_from(dir.path(), "broken").unwrap_err();
        assert!(matches!(err, Error::InvalidRisk(_)));
    }

    #[test]
    fn lowercase_confirmation_phrase_fails_at_load() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        fs::write(
            dir.path().join("sloppy.toml"),
            "[execution]\nconfirmation_phrase = \"confirm\"\n",
        )
        .unwrap();

        let err = load_settings_from(dir.path(), "sloppy").unwrap_err();
        assert!(matches!(err, Error::InvalidExecution(_)));
    }

    #[test]
    fn missing_base_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), "development"),
            Err(Error::LoadError(_))
        ));
    }
}

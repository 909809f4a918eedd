// In crates/app-config/src/types.rs

use execution::ExecutionSettings;
use risk::RiskConfig;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// The static risk policy. There is no way to change it without a restart.
    pub risk: RiskConfig,
    #[serde(default)]
    pub journal: JournalSettings,
    #[serde(default)]
    pub execution: ExecutionSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct JournalSettings {
    /// Directory the journal appends its `.jsonl` files to.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".to_string() }
fn default_log_dir() -> String { "journal_logs".to_string() }

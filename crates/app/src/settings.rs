//! Handles settings for the application.
//!
//! Settings are read from `settings.toml` (or the file named by
//! `EXPENSES_CONFIG`), then overridden by `EXPENSES__SECTION__KEY`
//! environment variables. Every key has a default, so the file is optional.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Default for Database {
    fn default() -> Self {
        Database::Sqlite("expenses.db".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 5000,
            database: Database::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub monthly_limit: f64,
    pub warning_threshold: f64,
    pub timezone: String,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            monthly_limit: 1000.0,
            warning_threshold: 0.8,
            timezone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub budget: Budget,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            std::env::var("EXPENSES_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("EXPENSES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

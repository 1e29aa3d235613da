//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and from `FXWALLET__*` environment variables
//! (`FXWALLET__SERVER__PORT=9000` overrides `server.port`).
//!
//! See `settings.toml` for the configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const SETTINGS_FILE: &str = "settings";
const ENV_PREFIX: &str = "FXWALLET";

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    /// Tracing level of the workspace crates.
    pub level: String,
    /// Name used in the `X-<name>-alert` response headers.
    pub name: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            name: "fxwalletApp".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Database,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(
            Config::builder()
                .add_source(File::with_name(SETTINGS_FILE).required(false))
                .add_source(
                    Environment::with_prefix(ENV_PREFIX)
                        .separator("__")
                        .try_parsing(true),
                )
                .build()?,
        )
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }
}

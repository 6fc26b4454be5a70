// Required external crates for configuration management and serialization
use serde::Deserialize;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File};
use tracing::warn;

/// Name of the environment variable holding the provider credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Configuration for the remote Gemini endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// Model identifier used for every generation call
    pub model: String,
    /// Base URL of the Generative Language API
    pub base_url: String,
    /// Credential, filled from GEMINI_API_KEY when present
    #[serde(default)]
    pub api_key: Option<String>,
    /// Optional request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Configuration for the HTTP server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Optional log directory
    pub file: Option<PathBuf>,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Remote model settings
    pub gemini: GeminiConfig,
    /// Server-related settings
    pub server: ServerConfig,
    /// Logging-related settings
    pub logging: LoggingConfig,
}

/// Implementation for loading and parsing configuration
impl Settings {
    /// Creates a new Settings instance from the working directory.
    ///
    /// Sources in order of precedence (highest to lowest):
    /// 1. `GEMINI_API_KEY` from the environment, then from `.env`
    /// 2. Environment variables prefixed with NLQA__ (e.g. NLQA__SERVER__PORT)
    /// 3. Local config file (config/local.toml) if present
    /// 4. Default config file (config/default.toml)
    pub fn new() -> Result<Self, ConfigError> {
        let base_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(
                format!("Failed to get current directory: {}", e)
            ))?;

        Self::load_from(&base_dir)
    }

    /// Loads settings relative to `base_dir`, which must contain a `config/` directory.
    pub fn load_from(base_dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env_key(base_dir, std::env::var(API_KEY_VAR).ok())
    }

    /// Like [`Settings::load_from`], with the `GEMINI_API_KEY` environment value passed in.
    pub fn load_with_env_key(base_dir: &Path, env_key: Option<String>) -> Result<Self, ConfigError> {
        let config_dir = base_dir.join("config");

        // Check if config directory exists
        if !config_dir.exists() {
            return Err(ConfigError::Message(
                format!("Config directory not found at: {}", config_dir.display())
            ));
        }

        // Check if default.toml exists
        let default_config = config_dir.join("default.toml");
        if !default_config.exists() {
            return Err(ConfigError::Message(
                format!("Default configuration file not found at: {}", default_config.display())
            ));
        }

        let local_config = config_dir.join("local.toml");

        // Convert paths to strings and keep them alive
        let default_config_path = default_config.to_string_lossy();
        let local_config_path = local_config.to_string_lossy();

        let api_key = Self::find_api_key(base_dir, env_key)?;

        let settings = Config::builder()
            .add_source(File::with_name(&default_config_path))
            .add_source(File::with_name(&local_config_path).required(false))
            .add_source(Environment::with_prefix("NLQA").prefix_separator("__").separator("__"))
            .set_override_option("gemini.api_key", api_key)?
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Picks the environment value first, then `GEMINI_API_KEY` from `<base_dir>/.env`.
    fn find_api_key(base_dir: &Path, env_key: Option<String>) -> Result<Option<String>, ConfigError> {
        if let Some(key) = env_key {
            if !key.trim().is_empty() {
                return Ok(Some(key.trim().to_string()));
            }
        }

        let dotenv_path = base_dir.join(".env");
        if !dotenv_path.exists() {
            return Ok(None);
        }

        let entries = dotenvy::from_path_iter(&dotenv_path).map_err(|e| ConfigError::Message(
            format!("Failed to read {}: {}", dotenv_path.display(), e)
        ))?;

        let mut found = None;
        for entry in entries {
            match entry {
                Ok((name, value)) if name == API_KEY_VAR => found = Some(value),
                Ok(_) => {}
                // A malformed unrelated line must not block startup
                Err(e) => warn!("Skipping unparseable line in {}: {}", dotenv_path.display(), e),
            }
        }

        Ok(found
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty()))
    }

    /// Returns the credential, if one was found
    pub fn api_key(&self) -> Option<&str> {
        self.gemini.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// The credential, or the message the CLI exits with when it is missing
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key().ok_or_else(|| ConfigError::Message(
            format!("{} not found in .env file.", API_KEY_VAR)
        ))
    }

    /// Directory the rolling log files are written to
    pub fn log_dir(&self) -> &Path {
        self.logging.file.as_deref().unwrap_or_else(|| Path::new("logs"))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::Message("gemini.model must not be empty".to_string()));
        }

        if !self.gemini.base_url.starts_with("http://") && !self.gemini.base_url.starts_with("https://") {
            return Err(ConfigError::Message(
                format!("gemini.base_url must be an http(s) URL, got: {}", self.gemini.base_url)
            ));
        }

        if self.gemini.timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "gemini.timeout_secs must be greater than 0 when set".to_string()
            ));
        }

        // Port 0 would bind an ephemeral port nobody can find
        if self.server.port == 0 {
            return Err(ConfigError::Message(
                format!("Port must be between 1 and 65535, got: {}", self.server.port)
            ));
        }

        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        // Create log directory if configured and doesn't exist
        if let Some(log_dir) = &self.logging.file {
            if !log_dir.exists() {
                std::fs::create_dir_all(log_dir).map_err(|e| {
                    ConfigError::Message(format!(
                        "Failed to create log directory at {}: {}",
                        log_dir.display(), e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

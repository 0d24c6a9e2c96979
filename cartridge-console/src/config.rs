use std::path::PathBuf;

use cartridge_client::ClientConfig;
use thiserror::Error;

use crate::cli::{
    DEFAULT_API_URL, DEFAULT_EXPORT_DIR, DEFAULT_LOG_LEVEL, DEFAULT_SESSION_DIR,
    DEFAULT_TIMEOUT_SECS, GlobalArgs,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API URL must start with http:// or https://: {0}")]
    InvalidApiUrl(String),

    #[error("Timeout must be at least one second")]
    InvalidTimeout,

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}

/// Console configuration
///
/// # Sources
///
/// Lowest to highest precedence: built-in defaults, `.env`, environment,
/// command-line flags.
///
/// | Env var | Flag | Default |
/// |---------|------|---------|
/// | CARTRIDGE_API_URL | --api-url | http://localhost:8080 |
/// | CARTRIDGE_SESSION_DIR | --session-dir | ./.cartridge-console |
/// | CARTRIDGE_EXPORT_DIR | --export-dir | . |
/// | CARTRIDGE_TIMEOUT_SECS | --timeout | 30 |
/// | CARTRIDGE_LOG_LEVEL | --log-level | info |
/// | CARTRIDGE_LOG_DIR | --log-dir | (console only) |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub session_dir: PathBuf,
    pub export_dir: PathBuf,
    pub timeout_secs: u64,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl ConsoleConfig {
    /// Validate the parsed flags
    pub fn from_args(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let api_url = args.api_url.trim().trim_end_matches('/').to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(args.api_url.clone()));
        }

        if args.timeout == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let log_level = args.log_level.trim().to_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(args.log_level.clone()));
        }

        Ok(Self {
            api_url,
            session_dir: args.session_dir.clone(),
            export_dir: args.export_dir.clone(),
            timeout_secs: args.timeout,
            log_level,
            log_dir: args.log_dir.clone(),
        })
    }

    pub fn client_config(&self, token: Option<String>) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_optional_token(token)
            .with_timeout(self.timeout_secs)
    }
}

use actix_web::http::Uri;
use thiserror::Error;

pub const HOST_VAR: &str = "TRAVEL_JOURNAL_HOST";
pub const PORT_VAR: &str = "TRAVEL_JOURNAL_PORT";
pub const LOG_LEVEL_VAR: &str = "TRAVEL_JOURNAL_LOG_LEVEL";
pub const CORS_ORIGINS_VAR: &str = "TRAVEL_JOURNAL_CORS_ORIGINS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("CORS origin {value:?} must be an absolute http(s) origin such as https://example.com")]
    InvalidOrigin { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup(HOST_VAR) {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::Empty(HOST_VAR)),
            Some(value) => value.trim().to_string(),
            None => defaults.host,
        };

        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value: value.clone(),
                })?,
            None => defaults.port,
        };

        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.log_level);

        let cors_allowed_origins = match lookup(CORS_ORIGINS_VAR) {
            Some(v) => v
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(parse_origin)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            host,
            port,
            log_level,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Accepts `scheme://host[:port]` with an http or https scheme and nothing
/// after the authority. Wildcards are refused.
fn parse_origin(value: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin {
        value: value.to_string(),
    };
    let uri: Uri = value.parse().map_err(|_| invalid())?;

    let scheme_ok = matches!(uri.scheme_str(), Some("http") | Some("https"));
    let host_ok = uri
        .host()
        .is_some_and(|host| !host.is_empty() && !host.contains('*'));
    let bare = matches!(uri.path(), "" | "/") && uri.query().is_none();
    if !(scheme_ok && host_ok && bare) {
        return Err(invalid());
    }

    Ok(value.trim_end_matches('/').to_string())
}

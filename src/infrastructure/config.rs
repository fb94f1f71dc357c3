use std::time::Duration;

/// Runtime configuration, read once at startup and handed to constructors
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub service_token: String,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// How long in-flight requests may drain after a shutdown signal
    pub shutdown_timeout: Duration,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite://hand.db";
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8003;

    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let seconds = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(v) => v
                    .parse()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::Invalid(key, v)),
                None => Ok(Duration::from_secs(default)),
            }
        };

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            Some(p) => p.parse().map_err(|_| ConfigError::Invalid("PORT", p))?,
            None => Self::DEFAULT_PORT,
        };

        Ok(Self {
            jwt_secret: require("JWT_SECRET")?,
            service_token: require("SERVICE_TOKEN")?,
            database_url: or_default("DATABASE_URL", Self::DEFAULT_DATABASE_URL),
            host: or_default("HOST", Self::DEFAULT_HOST),
            port,
            shutdown_timeout: seconds("SHUTDOWN_TIMEOUT_SECS", 5)?,
            request_timeout: seconds("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

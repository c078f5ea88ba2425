// Configuration module entry point
// Loads settings once at startup and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LogMode};

/// Default config file, looked up as `config.toml` (or any format the `config` crate knows)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for structured environment overrides, e.g. `USERS_API__SERVER__HOST`
const ENV_PREFIX: &str = "USERS_API";

/// Shortcut environment variables that take precedence over everything else
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    /// `PORT`
    pub port: Option<String>,
    /// `APP_MODE`
    pub mode: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok().filter(|p| !p.is_empty()),
            mode: std::env::var("APP_MODE").ok().filter(|m| !m.is_empty()),
        }
    }
}

impl Config {
    /// Load configuration from the given file path (without extension) and the process environment
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(config_path, &EnvOverrides::from_env())
    }

    /// Load configuration with explicit shortcut overrides
    pub fn load_with(
        config_path: &str,
        overrides: &EnvOverrides,
    ) -> Result<Self, config::ConfigError> {
        let port = match overrides.port.as_deref() {
            Some(raw) => Some(i64::from(raw.trim().parse::<u16>().map_err(|e| {
                config::ConfigError::Message(format!("Invalid PORT '{raw}': {e}"))
            })?)),
            None => None,
        };
        let mode = overrides
            .mode
            .as_deref()
            .map(|m| LogMode::from_env_value(m).as_str());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.mode", "debug")?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 60)?
            .set_default("http.server_name", "users-api/0.1")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_override_option("server.port", port)?
            .set_override_option("logging.mode", mode)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

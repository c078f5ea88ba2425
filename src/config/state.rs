// Application state module
// Shared, read-only runtime state handed to every connection

use super::types::{Config, LogMode};
use crate::http::CorsPolicy;
use crate::routing::Router;

/// Application state
///
/// Built once at startup; nothing in it changes while serving.
pub struct AppState {
    pub config: Config,
    pub cors: CorsPolicy,
    pub router: Router,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            cors: CorsPolicy::permissive(),
            router: Router::new(),
        }
    }

    pub const fn log_mode(&self) -> LogMode {
        self.config.logging.mode
    }
}

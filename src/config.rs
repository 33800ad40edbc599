//! Runtime configuration for the Gametime store.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Maximum Postgres connections in the shared pool.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before giving up.
    pub acquire_timeout: u64,
    /// Per-statement timeout (milliseconds) applied server-side.
    pub statement_timeout_ms: u64,
}

impl Settings {
    fn from_env() -> Self {
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let acquire_timeout = env::var("DB_ACQUIRE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        let statement_timeout_ms = env::var("DB_STATEMENT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5_000); // 5 s default

        Settings {
            max_connections,
            acquire_timeout,
            statement_timeout_ms,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}

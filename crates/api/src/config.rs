use std::time::Duration;

use sensorhub_core::synthesis::DEFAULT_HISTORY_LIMIT;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Interval between broadcast ticks in milliseconds (default: `1000`).
    pub broadcast_interval_ms: u64,
    /// Recent readings returned per sensor type on every tick (default: `10`).
    pub recent_readings_limit: i64,
    /// Maximum connections in the database pool (default: `25`).
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `8080`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `BROADCAST_INTERVAL_MS` | `1000`                   |
    /// | `RECENT_READINGS_LIMIT` | `10`                     |
    /// | `DB_MAX_CONNECTIONS`    | `25`                     |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Panics on unparsable or out-of-range values; misconfiguration should
    /// fail fast at startup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port: u16 = var("PORT", "8080")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let broadcast_interval_ms: u64 = var("BROADCAST_INTERVAL_MS", "1000")
            .parse()
            .expect("BROADCAST_INTERVAL_MS must be a valid u64");
        assert!(broadcast_interval_ms > 0, "BROADCAST_INTERVAL_MS must be positive");

        let recent_readings_limit: i64 =
            var("RECENT_READINGS_LIMIT", &DEFAULT_HISTORY_LIMIT.to_string())
                .parse()
                .expect("RECENT_READINGS_LIMIT must be a valid i64");
        assert!(recent_readings_limit > 0, "RECENT_READINGS_LIMIT must be positive");

        let db_max_connections: u32 = var("DB_MAX_CONNECTIONS", "25")
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            broadcast_interval_ms,
            recent_readings_limit,
            db_max_connections,
        }
    }

    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_millis(self.broadcast_interval_ms)
    }
}

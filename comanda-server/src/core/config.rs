use chrono_tz::Tz;

/// Default business timezone (fixed UTC-5)
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Lima;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | DATABASE_URL | `<WORK_DIR>/comanda.db` | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | (stdout only) | Directory for daily rolling log files |
/// | TIMEZONE | America/Lima | Business timezone for calendar-day filters |
/// | REQUEST_TIMEOUT_MS | 30000 | Request timeout (ms) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown timeout (ms) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/comanda HTTP_PORT=8080 TIMEZONE=America/Bogota cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory
    pub work_dir: String,
    /// SQLite database path
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Business timezone
    pub timezone: Tz,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Shutdown timeout (ms)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_URL")
            .map(|url| url.trim_start_matches("sqlite://").trim_start_matches("sqlite:").to_string())
            .unwrap_or_else(|_| format!("{work_dir}/comanda.db"));

        Self {
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .and_then(|tz| parse_timezone(&tz))
                .unwrap_or(DEFAULT_TIMEZONE),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            work_dir,
        }
    }

    /// Override the storage location and port
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = format!("{}/comanda.db", config.work_dir);
        config.http_port = http_port;
        config
    }

    /// Is production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Is development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_timezone(name: &str) -> Option<Tz> {
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(e) => {
            tracing::warn!("Invalid TIMEZONE '{}': {}, using {}", name, e, DEFAULT_TIMEZONE);
            None
        }
    }
}

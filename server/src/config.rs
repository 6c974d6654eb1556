//! Startup configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use tasks_core::DEFAULT_EXTERNAL_TASKS_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("STORAGE: unknown mode {0:?}, expected \"memory\" or \"postgres\"")]
    UnknownStorage(String),
}

/// Which `TaskRepository` the process runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StorageMode::Memory),
            "postgres" | "postgresql" => Ok(StorageMode::Postgres),
            _ => Err(ConfigError::UnknownStorage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub storage: StorageMode,
    pub database_url: String,
    pub db_max_connections: u32,
    pub storage_timeout: Duration,
    pub external_tasks_url: String,
    pub external_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let or = |var: &str, default: &str| get(var).unwrap_or_else(|| default.to_string());

        let storage = match get("STORAGE") {
            Some(value) => value.parse()?,
            None => StorageMode::default(),
        };

        let database_url = get("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                or("DB_USER", "postgres"),
                or("DB_PASSWORD", "postgres"),
                or("DB_HOST", "localhost"),
                or("DB_PORT", "5434"),
                or("DB_NAME", "tasks"),
                or("DB_SSLMODE", "disable"),
            )
        });

        Ok(Self {
            host: or("APP_HOST", "0.0.0.0"),
            port: parse_var(&get, "APP_PORT", 8080)?,
            api_key: or("API_KEY", "secret12345"),
            storage,
            database_url,
            db_max_connections: parse_var(&get, "DB_MAX_CONNECTIONS", 5)?,
            storage_timeout: Duration::from_secs(parse_var(&get, "DB_EXEC_TIMEOUT_SECS", 5)?),
            external_tasks_url: or("EXTERNAL_TASKS_URL", DEFAULT_EXTERNAL_TASKS_URL),
            external_timeout: Duration::from_secs(parse_var(&get, "EXTERNAL_TIMEOUT_SECS", 10)?),
            shutdown_grace: Duration::from_secs(parse_var(&get, "SHUTDOWN_GRACE_SECS", 10)?),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

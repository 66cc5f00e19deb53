use dotenvy::dotenv;
use std::{env, num::NonZeroU32};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Database
    pub db_host:            String,
    pub db_port:            u16,
    pub db_name:            String,
    pub db_user:            String,
    pub db_password:        String,
    pub db_max_connections: u32,

    // App
    pub app_name:           String,
    pub app_env:            String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Optional keys fall back to their defaults only when absent; a value
    /// that is present but unparsable is an error.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| -> Result<String, ConfigError> {
            lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()))
        };

        let defaults = Self::default();

        Ok(Self {
            db_host:            lookup("DB_HOST").unwrap_or(defaults.db_host),
            db_port:            parse_or(&lookup, "DB_PORT", defaults.db_port)?,
            db_name:            require("DB_NAME")?,
            db_user:            require("DB_USER")?,
            db_password:        require("DB_PASSWORD")?,
            db_max_connections: pool_size_or(&lookup, defaults.db_max_connections)?,

            app_name:           lookup("APP_NAME").unwrap_or(defaults.app_name),
            app_env:            lookup("APP_ENV").unwrap_or(defaults.app_env),
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    pub fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.db_user,
            self.db_password,
            self.db_host,
            self.db_port,
            self.db_name,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host:            "db".into(),
            db_port:            3306,
            db_name:            "appenv".into(),
            db_user:            "appenv".into(),
            db_password:        "appenv".into(),
            db_max_connections: 10,

            app_name:           "appenv".into(),
            app_env:            "development".into(),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), raw)),
    }
}

/// `DB_MAX_CONNECTIONS` must be at least 1.
fn pool_size_or<F>(lookup: &F, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const KEY: &str = "DB_MAX_CONNECTIONS";
    match lookup(KEY) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<NonZeroU32>()
            .map(NonZeroU32::get)
            .map_err(|_| ConfigError::InvalidValue(KEY.to_string(), raw)),
    }
}

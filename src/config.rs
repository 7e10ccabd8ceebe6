use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    pub api_prefix: String,
    pub seed_sample_data: bool,

    // Rate limiting, 0 disables it
    pub rate_api_per_min: u32,

    pub cors_allowed_origin: Option<String>,

    pub log_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:4000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/presence.sqlite".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            seed_sample_data: parse_var("SEED_SAMPLE_DATA", true)?,

            rate_api_per_min: parse_var("RATE_API_PER_MIN", 1000)?,

            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// In-memory store, no seed, no rate limiting.
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            api_prefix: "/api".to_string(),
            seed_sample_data: false,
            rate_api_per_min: 0,
            cors_allowed_origin: None,
            log_dir: "logs".to_string(),
            log_level: "debug".to_string(),
        }
    }
}

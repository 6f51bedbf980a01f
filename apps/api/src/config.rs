use anyhow::{Context, Result};

use crate::scoring::opportunity::RECOMMENDATION_THRESHOLD;
use crate::scoring::recommend::DEFAULT_LIMIT;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    pub recommendation_threshold: u32,
    pub recommendation_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: optional_env("DATABASE_MAX_CONNECTIONS", 10)?,
            jwt_secret: require_env("JWT_SECRET")?,
            port: optional_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            recommendation_threshold: optional_env(
                "RECOMMENDATION_THRESHOLD",
                RECOMMENDATION_THRESHOLD,
            )?,
            recommendation_limit: optional_env("RECOMMENDATION_LIMIT", DEFAULT_LIMIT)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

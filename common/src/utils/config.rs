use super::error::{ApiError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    pub database_url: String,
    pub database_tls: bool,
    pub database_ca_cert: Option<String>,
    pub max_db_connections: u32,
    pub api_port: u16,
    pub admin_pin: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub remember_ttl_days: i64,
    pub wall_limit: u32,
    pub school_name: String,
    pub school_motto: String,
    pub school_session: String,
    pub crown_interval_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: Self::get_required_env("DATABASE_URL")?,
            database_tls: Self::parse_env("DATABASE_TLS", "false")?,
            database_ca_cert: env::var("DATABASE_CA_CERT").ok(),
            max_db_connections: Self::parse_env("MAX_DB_CONNECTIONS", "16")?,
            api_port: Self::parse_env("PORT", "8080")?,
            admin_pin: env::var("ADMIN_PIN").unwrap_or_else(|_| "1234".to_owned()),
            session_secret: Self::get_required_env("SESSION_SECRET")?,
            session_ttl_hours: Self::parse_env("SESSION_TTL_HOURS", "12")?,
            remember_ttl_days: Self::parse_env("REMEMBER_TTL_DAYS", "30")?,
            wall_limit: Self::parse_env("WALL_LIMIT", "200")?,
            school_name: env::var("SCHOOL_NAME")
                .unwrap_or_else(|_| "Green Valley High School".to_owned()),
            school_motto: env::var("SCHOOL_MOTTO").unwrap_or_else(|_| "Kindness Every Day".to_owned()),
            school_session: env::var("SCHOOL_SESSION").unwrap_or_else(|_| "2025".to_owned()),
            crown_interval_seconds: Self::parse_env("CROWN_INTERVAL_SECONDS", "3600")?,
        })
    }

    fn get_required_env(key: &str) -> Result<String> {
        env::var(key).map_err(|_| ApiError::Config(format!("{} not set", key)))
    }

    fn parse_env<T>(key: &str, default: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Debug,
    {
        env::var(key)
            .as_deref()
            .unwrap_or(default)
            .parse()
            .map_err(|_| ApiError::Config(format!("Invalid {}", key)))
    }
}

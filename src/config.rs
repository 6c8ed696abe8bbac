use std::str::FromStr;

use anyhow::Context;

use crate::meals::ordering::MealOrder;

pub const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// No URL means meals live in process memory.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub session_max_age_secs: u64,
    pub metrics_order: MealOrder,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 10,
            host: "0.0.0.0".into(),
            port: 3333,
            session_max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
            metrics_order: MealOrder::Insertion,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            host: std::env::var("APP_HOST").unwrap_or(defaults.host),
            port: parse_var("APP_PORT", defaults.port)?,
            session_max_age_secs: parse_var(
                "SESSION_MAX_AGE_SECS",
                defaults.session_max_age_secs,
            )?,
            metrics_order: parse_var("METRICS_ORDER", defaults.metrics_order)?,
        })
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().with_context(|| format!("invalid {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

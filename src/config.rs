use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    /// Unset means the in-memory store
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub order_sheet_url: Option<String>,
    pub media_cloud_name: String,
    pub media_root: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            port: try_load("PORT", "8083")?,
            database_url: optional("DATABASE_URL"),
            max_connections: try_load("DB_MAX_CONNECTIONS", "10")?,
            order_sheet_url: optional("ORDER_SHEET_URL"),
            media_cloud_name: try_load("MEDIA_CLOUD_NAME", "printshop")?,
            media_root: try_load("MEDIA_ROOT", "yhe")?,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    let value = env::var(key).ok().filter(|v| !v.trim().is_empty());
    if value.is_none() {
        warn!("Environment variable {key} not set");
    }
    value
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e: T::Err| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw}"))
}

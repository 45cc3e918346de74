use anyhow::{anyhow, Context, Result};

use crate::layout::PageSize;

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults suit local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_size: PageSize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            page_size: std::env::var("REPORT_PAGE_SIZE")
                .unwrap_or_else(|_| "a4".to_string())
                .parse::<PageSize>()
                .map_err(|e| anyhow!(e))
                .context("REPORT_PAGE_SIZE must be a4 or letter")?,
        })
    }
}

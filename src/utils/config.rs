use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    COINCAP_API_BASE_URL, DEFAULT_HOLDINGS_FILE, DEFAULT_INTERVAL,
    DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_REQUESTS_PER_SECOND, DEFAULT_WINDOW_END_MS,
    DEFAULT_WINDOW_START_MS,
};
use crate::errors::{Result, WalletError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub interval: String,
    pub window_start_ms: i64,
    pub window_end_ms: i64,
    pub max_concurrent_requests: usize,
    pub requests_per_second: f64,
    pub holdings_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| COINCAP_API_BASE_URL.to_string()),
            interval: env::var("PRICE_INTERVAL").unwrap_or_else(|_| DEFAULT_INTERVAL.to_string()),
            window_start_ms: parse_env("WINDOW_START_MS", DEFAULT_WINDOW_START_MS)?,
            window_end_ms: parse_env("WINDOW_END_MS", DEFAULT_WINDOW_END_MS)?,
            max_concurrent_requests: parse_env(
                "MAX_CONCURRENT_REQUESTS",
                DEFAULT_MAX_CONCURRENT_REQUESTS,
            )?,
            requests_per_second: parse_env("REQUESTS_PER_SECOND", DEFAULT_REQUESTS_PER_SECOND)?,
            holdings_file: env::var("HOLDINGS_FILE")
                .unwrap_or_else(|_| DEFAULT_HOLDINGS_FILE.to_string()),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(WalletError::config("API base URL cannot be empty"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(WalletError::config(
                "MAX_CONCURRENT_REQUESTS must be at least 1",
            ));
        }
        if !self.requests_per_second.is_finite() || self.requests_per_second <= 0.0 {
            return Err(WalletError::config(
                "REQUESTS_PER_SECOND must be a positive number",
            ));
        }
        if self.window_end_ms <= self.window_start_ms {
            return Err(WalletError::config(
                "WINDOW_END_MS must be after WINDOW_START_MS",
            ));
        }
        Ok(())
    }
}

/// An unset variable falls back to its default; a set-but-unparsable value
/// is a configuration error rather than a silent fallback.
fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| WalletError::config(format!("Invalid {} {:?}: {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}

//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DASHBOARD_API_BASE_URL` - Base URL of the backend REST API
//!
//! ## Optional
//! - `DASHBOARD_API_TOKEN` - Bearer token sent with order submissions
//! - `DASHBOARD_CART_BUFFER` - Cart mailbox capacity (default: 32)
//! - `DASHBOARD_HTTP_TIMEOUT_SECS` - Order API timeout in seconds (default: 10)

use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_CART_BUFFER: usize = 32;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub cart_buffer: usize,
    pub http_timeout: Duration,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = lookup("DASHBOARD_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DASHBOARD_API_BASE_URL".to_string()))?;

        let api_token = lookup("DASHBOARD_API_TOKEN").filter(|v| !v.is_empty());

        let cart_buffer = parse_positive(&lookup, "DASHBOARD_CART_BUFFER", DEFAULT_CART_BUFFER)?;
        let timeout_secs =
            parse_positive(&lookup, "DASHBOARD_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            api_base_url: api_base_url.trim().to_string(),
            api_token,
            cart_buffer,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a positive integer, got {raw:?}"),
        )),
    }
}

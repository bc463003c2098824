use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_MESSAGE_HIDE_SECS: u64 = 5;

/// Admin CLI configuration, loaded from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub api_url: String,
    pub message_hide: Duration,
    /// No timeout unless configured.
    pub http_timeout: Option<Duration>,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let secs = |key: &str| -> Result<Option<u64>> {
            match var(key) {
                Some(raw) => {
                    let value = raw
                        .trim()
                        .parse::<u64>()
                        .with_context(|| format!("{key} must be a whole number of seconds"))?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        };

        Ok(Self {
            api_url: var("ACTIVITIES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            message_hide: Duration::from_secs(
                secs("ACTIVITIES_MESSAGE_HIDE_SECS")?.unwrap_or(DEFAULT_MESSAGE_HIDE_SECS),
            ),
            http_timeout: secs("ACTIVITIES_HTTP_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

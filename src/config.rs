//! API client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console is served as static assets, so there is no runtime
//! environment to read. Values are baked in at build time through
//! `option_env!` and fall back to the defaults the backend expects.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 120;

/// Base URL and per-call-class timeouts for the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub download_timeout: Duration,
    pub verify_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            download_timeout: Duration::from_secs(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            verify_timeout: Duration::from_secs(DEFAULT_VERIFY_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Build config from values captured at compile time.
    ///
    /// Optional:
    /// - `CONSOLE_API_BASE_URL`: default `/api/v1`
    /// - `CONSOLE_API_TIMEOUT_SECS`: default 10
    /// - `CONSOLE_DOWNLOAD_TIMEOUT_SECS`: default 30
    /// - `CONSOLE_VERIFY_TIMEOUT_SECS`: default 120
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "CONSOLE_API_BASE_URL" => option_env!("CONSOLE_API_BASE_URL"),
                "CONSOLE_API_TIMEOUT_SECS" => option_env!("CONSOLE_API_TIMEOUT_SECS"),
                "CONSOLE_DOWNLOAD_TIMEOUT_SECS" => option_env!("CONSOLE_DOWNLOAD_TIMEOUT_SECS"),
                "CONSOLE_VERIFY_TIMEOUT_SECS" => option_env!("CONSOLE_VERIFY_TIMEOUT_SECS"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup. Missing or unparsable
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CONSOLE_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());

        Self {
            base_url,
            request_timeout: secs(&lookup, "CONSOLE_API_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            download_timeout: secs(&lookup, "CONSOLE_DOWNLOAD_TIMEOUT_SECS", DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            verify_timeout: secs(&lookup, "CONSOLE_VERIFY_TIMEOUT_SECS", DEFAULT_VERIFY_TIMEOUT_SECS),
        }
    }

    /// Join an API path (leading slash) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn secs<F>(lookup: &F, key: &str, default: u64) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default);
    Duration::from_secs(value)
}

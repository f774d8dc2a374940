use std::time::Duration;

use anyhow::{anyhow, Result};

const DEFAULT_TABLE: &str = "match_scorecards";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: Option<String>,
    pub backend_key: Option<String>,
    pub scorecard_table: String,
    pub request_timeout: Duration,
    pub leaderboard_top: Option<usize>,
}

/// Backend coordinates needed to fetch scorecards.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub table: &'a str,
    pub timeout: Duration,
}

impl Config {
    /// Load `.env.local` and `.env` (if present), then read the process env.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout = text("LBPL_REQUEST_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let leaderboard_top = text("LBPL_LEADERBOARD_TOP")
            .and_then(|val| val.parse::<usize>().ok())
            .filter(|n| *n > 0);

        Self {
            backend_url: text("LBPL_BACKEND_URL").map(|url| url.trim_end_matches('/').to_string()),
            backend_key: text("LBPL_BACKEND_KEY"),
            scorecard_table: text("LBPL_SCORECARD_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            request_timeout: Duration::from_secs(request_timeout),
            leaderboard_top,
        }
    }

    pub fn backend(&self) -> Result<BackendConfig<'_>> {
        let base_url = self
            .backend_url
            .as_deref()
            .ok_or_else(|| anyhow!("LBPL_BACKEND_URL is not set"))?;
        let api_key = self
            .backend_key
            .as_deref()
            .ok_or_else(|| anyhow!("LBPL_BACKEND_KEY is not set"))?;
        Ok(BackendConfig {
            base_url,
            api_key,
            table: &self.scorecard_table,
            timeout: self.request_timeout,
        })
    }
}

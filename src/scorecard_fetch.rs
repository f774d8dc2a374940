use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::config::BackendConfig;
use crate::http_client::http_client;
use crate::scorecard::{parse_scorecards_json, MatchScorecard};

pub fn scorecards_url(backend: &BackendConfig<'_>) -> String {
    format!(
        "{}/rest/v1/{}?select=*",
        backend.base_url.trim_end_matches('/'),
        backend.table
    )
}

/// Fetch every scorecard row from the hosted backend.
pub fn fetch_scorecards(backend: &BackendConfig<'_>) -> Result<Vec<MatchScorecard>> {
    let client = http_client(backend.timeout)?;
    let url = scorecards_url(backend);
    tracing::info!(table = backend.table, "fetching scorecards");

    let resp = client
        .get(&url)
        .header("apikey", backend.api_key)
        .header(AUTHORIZATION, format!("Bearer {}", backend.api_key))
        .header(ACCEPT, "application/json")
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }

    let rows = parse_scorecards_json(&body)?;
    tracing::info!(rows = rows.len(), "scorecards fetched");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn url_targets_rest_table() {
        let backend = BackendConfig {
            base_url: "https://lbpl.example/",
            api_key: "anon",
            table: "match_scorecards",
            timeout: Duration::from_secs(5),
        };
        assert_eq!(
            scorecards_url(&backend),
            "https://lbpl.example/rest/v1/match_scorecards?select=*"
        );
    }
}

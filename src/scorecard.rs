use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::dismissal::{parse_optional_dismissal, FieldingCredit};

const COMPLETED_STATUSES: [&str; 4] = ["completed", "complete", "finished", "result"];

/// One batter's line in one innings, as entered by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingEntry {
    #[serde(default, deserialize_with = "lenient_name")]
    pub player_name: String,
    #[serde(default, alias = "how_out", deserialize_with = "lenient_string")]
    pub dismissal: Option<String>,
}

impl BattingEntry {
    pub fn new(player_name: &str, dismissal: &str) -> Self {
        Self {
            player_name: player_name.to_string(),
            dismissal: Some(dismissal.to_string()),
        }
    }

    pub fn credits(&self) -> Vec<FieldingCredit> {
        parse_optional_dismissal(self.dismissal.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScorecard {
    #[serde(default, deserialize_with = "id_as_string")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(
        default,
        alias = "team_a_batting",
        alias = "innings1",
        deserialize_with = "lenient_entries"
    )]
    pub team1_batting: Vec<BattingEntry>,
    #[serde(
        default,
        alias = "team_b_batting",
        alias = "innings2",
        deserialize_with = "lenient_entries"
    )]
    pub team2_batting: Vec<BattingEntry>,
}

impl MatchScorecard {
    pub fn from_sides(team1: Vec<BattingEntry>, team2: Vec<BattingEntry>) -> Self {
        Self {
            team1_batting: team1,
            team2_batting: team2,
            ..Self::default()
        }
    }

    /// Both sides' batting entries, first innings first.
    pub fn batting_entries(&self) -> impl Iterator<Item = &BattingEntry> {
        self.team1_batting.iter().chain(self.team2_batting.iter())
    }

    /// Rows without a status are treated as results already entered.
    pub fn is_completed(&self) -> bool {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(status) => COMPLETED_STATUSES
                .iter()
                .any(|s| s.eq_ignore_ascii_case(status)),
        }
    }
}

/// Decode scorecard rows. Accepts a bare array or an object with a `data` array;
/// an empty body or `null` is zero rows.
///
/// Only unreadable JSON or a non-array root is an error. Rows that are not
/// objects are skipped, and malformed sides or entries inside a row decode as
/// missing.
pub fn parse_scorecards_json(raw: &str) -> Result<Vec<MatchScorecard>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid scorecards json")?;
    let rows = match root {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(Value::Array(rows)) => rows,
            Some(other) => anyhow::bail!("expected scorecard array in data, got {}", json_kind(&other)),
        },
        other => anyhow::bail!("expected scorecard array, got {}", json_kind(&other)),
    };

    let total = rows.len();
    let cards: Vec<MatchScorecard> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value(row) {
            Ok(card) => Some(card),
            Err(err) => {
                tracing::warn!(row = idx, error = %err, "skipping scorecard row");
                None
            }
        })
        .collect();
    if cards.len() < total {
        tracing::warn!(kept = cards.len(), total, "some scorecard rows were unreadable");
    }
    Ok(cards)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A batting side: anything but an array is an empty side, and entries that
/// fail to decode are dropped.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<BattingEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

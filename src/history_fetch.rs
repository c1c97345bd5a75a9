use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::warn;

use crate::http_client::{fetch_json, http_client};

/// One finished match from the historical results dataset.
#[derive(Debug, Clone)]
pub struct HistoricalMatch {
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub season: String,
    pub home_goals: u8,
    pub away_goals: u8,
}

impl HistoricalMatch {
    pub fn score_string(&self) -> String {
        format!("{}-{}", self.home_goals, self.away_goals)
    }
}

/// Best effort across the configured seasons: a season that fails to
/// download or parse is logged and skipped, so a broken historical source
/// degrades the report to "no head-to-head data" instead of failing it.
pub fn fetch_history(base_url: &str, seasons: &[String]) -> Vec<HistoricalMatch> {
    let client = match http_client() {
        Ok(client) => client,
        Err(err) => {
            warn!("historical fetch skipped: {err:#}");
            return Vec::new();
        }
    };

    let mut corpus = Vec::new();
    for season in seasons {
        match fetch_season(client, base_url, season) {
            Ok(mut rows) => corpus.append(&mut rows),
            Err(err) => warn!("historical season {season} unavailable: {err:#}"),
        }
    }
    corpus
}

fn fetch_season(client: &Client, base_url: &str, season: &str) -> Result<Vec<HistoricalMatch>> {
    let url = format!("{base_url}/{season}/en.1.json");
    let body = fetch_json(client, &url).context("season request failed")?;
    parse_season_json(&body, season)
}

pub fn parse_season_json(raw: &str, season: &str) -> Result<Vec<HistoricalMatch>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid season json")?;
    let matches = root
        .get("matches")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow!("missing matches array for season {season}"))?;

    let mut out = Vec::with_capacity(matches.len());
    for entry in matches {
        if let Some(row) = parse_match(entry, season) {
            out.push(row);
        }
    }
    Ok(out)
}

// Unplayed or malformed rows (no full-time score yet) are skipped.
fn parse_match(v: &Value, season: &str) -> Option<HistoricalMatch> {
    let date = v.get("date")?.as_str()?.to_string();
    let home_team = team_name_value(v.get("team1")?)?;
    let away_team = team_name_value(v.get("team2")?)?;
    let ft = v.get("score")?.get("ft")?.as_array()?;
    let home_goals = ft.first()?.as_u64()?;
    let away_goals = ft.get(1)?.as_u64()?;

    Some(HistoricalMatch {
        home_team,
        away_team,
        date,
        season: season.to_string(),
        home_goals: u8::try_from(home_goals).ok()?,
        away_goals: u8::try_from(away_goals).ok()?,
    })
}

// Older season files carry plain strings, newer ones `{"name": ...}`.
fn team_name_value(v: &Value) -> Option<String> {
    match v {
        Value::String(name) => Some(name.trim().to_string()),
        Value::Object(map) => match map.get("name") {
            Some(Value::String(name)) => Some(name.trim().to_string()),
            _ => None,
        },
        _ => None,
    }
}

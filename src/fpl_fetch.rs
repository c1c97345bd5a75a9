use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::http_client::{fetch_json, http_client};

#[derive(Debug, Clone, Deserialize)]
pub struct Player {
    pub id: u32,
    pub first_name: String,
    pub second_name: String,
    pub web_name: String,
    pub team: u32,
    pub now_cost: u32,
    #[serde(default)]
    pub points_per_game: String,
    #[serde(default)]
    pub status: String,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name)
    }

    /// `now_cost` is transported as integer tenths of £m.
    pub fn price(&self) -> f64 {
        f64::from(self.now_cost) / 10.0
    }

    /// Points per game arrives as a string; unparseable values read as 0.0
    /// rather than failing the whole report entry.
    pub fn ppg(&self) -> f64 {
        self.points_per_game.trim().parse().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub team_h: u32,
    pub team_a: u32,
    #[serde(default)]
    pub team_h_difficulty: u8,
    #[serde(default)]
    pub team_a_difficulty: u8,
    #[serde(default)]
    pub kickoff_time: Option<String>,
    #[serde(default)]
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct BootstrapData {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
}

pub fn fetch_bootstrap(base_url: &str) -> Result<BootstrapData> {
    let client = http_client()?;
    let url = format!("{base_url}/bootstrap-static/");
    let body = fetch_json(client, &url).context("bootstrap request failed")?;
    parse_bootstrap_json(&body)
}

pub fn fetch_fixtures(base_url: &str) -> Result<Vec<Fixture>> {
    let client = http_client()?;
    let url = format!("{base_url}/fixtures/");
    let body = fetch_json(client, &url).context("fixtures request failed")?;
    parse_fixtures_json(&body)
}

pub fn parse_bootstrap_json(raw: &str) -> Result<BootstrapData> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("empty bootstrap response"));
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid bootstrap json")?;

    let players: Vec<Player> = collect_rows(root.get("elements"));
    let teams: Vec<Team> = collect_rows(root.get("teams"));
    if players.is_empty() || teams.is_empty() {
        return Err(anyhow!("bootstrap response missing players or teams"));
    }

    Ok(BootstrapData { players, teams })
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    Ok(collect_rows(Some(&root)))
}

// Rows that fail to deserialize are dropped rather than failing the whole
// payload; the upstream occasionally ships placeholder entries.
fn collect_rows<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    let Some(list) = value.and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|row| serde_json::from_value(row.clone()).ok())
        .collect()
}

use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FPL_BASE_URL: &str = "https://fantasy.premierleague.com/api";
const DEFAULT_HISTORY_BASE_URL: &str =
    "https://raw.githubusercontent.com/openfootball/football.json/master";
const DEFAULT_HISTORY_SEASONS: &str = "2025-26,2024-25,2023-24";

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub fpl_base_url: String,
    pub history_base_url: String,
    pub history_seasons: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", DEFAULT_BIND_ADDR),
            fpl_base_url: base_url(env_or("FPL_BASE_URL", DEFAULT_FPL_BASE_URL)),
            history_base_url: base_url(env_or("HISTORY_BASE_URL", DEFAULT_HISTORY_BASE_URL)),
            history_seasons: parse_seasons(&env_or("HISTORY_SEASONS", DEFAULT_HISTORY_SEASONS)),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_seasons(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|season| season.trim().to_string())
        .filter(|season| !season.is_empty())
        .collect()
}

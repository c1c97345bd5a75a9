use serde::Serialize;

use crate::fpl_fetch::{BootstrapData, Fixture, Player};
use crate::head_to_head::{HeadToHead, head_to_head};
use crate::history_fetch::HistoricalMatch;
use crate::player_match::{MatchOutcome, PlayerIndex};
use crate::team_fixtures::{next_fixtures, summarize_difficulty, team_name};

// Field order on these structs is the response key order; nothing here may
// depend on map iteration order.

#[derive(Debug, Serialize)]
pub struct FixtureEntry {
    pub opponent: String,
    pub home: bool,
    pub kickoff_time: Option<String>,
    pub label: &'static str,
    pub difficulty: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_to_head: Option<HeadToHead>,
}

#[derive(Debug, Serialize)]
pub struct PlayerReport {
    pub player: String,
    pub team: String,
    pub price: f64,
    pub ppg: f64,
    pub status: String,
    pub summary: String,
    pub fixtures: Vec<FixtureEntry>,
}

/// One element of the `/compare` response array: a full report for a
/// matched name, or an inline error for an unmatched one.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CompareEntry {
    Report(PlayerReport),
    NoMatch {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
}

/// Pure pipeline from requested names to response entries, preserving the
/// caller's order. All data has already been fetched.
pub fn build_compare_report(
    names: &[String],
    bootstrap: &BootstrapData,
    fixtures: &[Fixture],
    history: &[HistoricalMatch],
) -> Vec<CompareEntry> {
    let index = PlayerIndex::build(&bootstrap.players);

    names
        .iter()
        .map(|name| match index.lookup(name) {
            MatchOutcome::Matched(player) => {
                CompareEntry::Report(player_report(player, bootstrap, fixtures, history))
            }
            MatchOutcome::Unmatched { suggestion } => CompareEntry::NoMatch {
                error: format!("No match for '{name}'"),
                suggestion,
            },
        })
        .collect()
}

fn player_report(
    player: &Player,
    bootstrap: &BootstrapData,
    fixtures: &[Fixture],
    history: &[HistoricalMatch],
) -> PlayerReport {
    let team = team_name(player.team, &bootstrap.teams).to_string();
    let upcoming = next_fixtures(player.team, fixtures, &bootstrap.teams);
    let summary = summarize_difficulty(&upcoming);

    let fixtures = upcoming
        .into_iter()
        .map(|fixture| {
            let h2h = head_to_head(&team, &fixture.opponent, history);
            FixtureEntry {
                opponent: fixture.opponent,
                home: fixture.home,
                kickoff_time: fixture.kickoff_time,
                label: fixture.label,
                difficulty: fixture.difficulty,
                head_to_head: h2h,
            }
        })
        .collect();

    PlayerReport {
        player: player.full_name(),
        team,
        price: player.price(),
        ppg: player.ppg(),
        status: player.status.clone(),
        summary,
        fixtures,
    }
}

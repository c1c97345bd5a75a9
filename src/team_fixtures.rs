use std::cmp::Ordering;

use crate::fpl_fetch::{Fixture, Team};

/// Fixture difficulty rating → label. Values outside the table render as
/// "Unknown".
const FDR_LABELS: [(u8, &str); 5] = [
    (1, "Very Easy"),
    (2, "Easy"),
    (3, "Evenly Matched"),
    (4, "Difficult"),
    (5, "Likely To Lose"),
];

/// How many upcoming fixtures a report shows per player.
pub const FIXTURE_HORIZON: usize = 4;

pub fn fdr_label(difficulty: u8) -> &'static str {
    FDR_LABELS
        .iter()
        .find(|(value, _)| *value == difficulty)
        .map(|(_, label)| *label)
        .unwrap_or("Unknown")
}

pub fn team_name(team_id: u32, teams: &[Team]) -> &str {
    teams
        .iter()
        .find(|t| t.id == team_id)
        .map(|t| t.name.as_str())
        .unwrap_or("Unknown")
}

/// One upcoming fixture from a single team's perspective.
#[derive(Debug, Clone)]
pub struct UpcomingFixture {
    pub opponent: String,
    pub home: bool,
    pub kickoff_time: Option<String>,
    pub label: &'static str,
    pub difficulty: u8,
}

/// The soonest unplayed fixtures for a team, kickoff ascending, capped at
/// [`FIXTURE_HORIZON`]. Fixtures without a kickoff yet sort last so a
/// scheduled fixture is never displaced by an unscheduled one.
pub fn next_fixtures(team_id: u32, fixtures: &[Fixture], teams: &[Team]) -> Vec<UpcomingFixture> {
    let mut upcoming = Vec::new();
    for fixture in fixtures {
        if fixture.finished {
            continue;
        }
        let home = if fixture.team_h == team_id {
            true
        } else if fixture.team_a == team_id {
            false
        } else {
            continue;
        };
        let opponent_id = if home { fixture.team_a } else { fixture.team_h };
        let difficulty = if home {
            fixture.team_h_difficulty
        } else {
            fixture.team_a_difficulty
        };

        upcoming.push(UpcomingFixture {
            opponent: team_name(opponent_id, teams).to_string(),
            home,
            kickoff_time: fixture.kickoff_time.clone(),
            label: fdr_label(difficulty),
            difficulty,
        });
    }

    // Kickoff times are RFC 3339 UTC, so string order is time order.
    upcoming.sort_by(|a, b| match (&a.kickoff_time, &b.kickoff_time) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    upcoming.truncate(FIXTURE_HORIZON);
    upcoming
}

/// Comma-joined counts per lowercased label, first-seen order, e.g.
/// "2 easy, 1 difficult".
pub fn summarize_difficulty(fixtures: &[UpcomingFixture]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for fixture in fixtures {
        match counts.iter_mut().find(|(label, _)| *label == fixture.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((fixture.label, 1)),
        }
    }
    counts
        .iter()
        .map(|(label, count)| format!("{count} {}", label.to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ")
}

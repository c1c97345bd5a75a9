use chrono::NaiveDate;
use serde::Serialize;

use crate::history_fetch::HistoricalMatch;
use crate::normalize::normalize;

/// Fantasy-API short team names → the historical dataset's full names.
/// Only names the containment test cannot bridge on its own need an entry
/// ("Man City" is not a substring of "Manchester City FC").
const TEAM_ALIASES: &[(&str, &str)] = &[
    ("Man City", "Manchester City"),
    ("Man Utd", "Manchester United"),
    ("Nott'm Forest", "Nottingham Forest"),
    ("Sheffield Utd", "Sheffield United"),
    ("Spurs", "Tottenham Hotspur"),
    ("Wolves", "Wolverhampton Wanderers"),
];

/// How many head-to-head records a fixture block shows.
pub const H2H_HORIZON: usize = 4;

fn canonical_team_name(name: &str) -> &str {
    TEAM_ALIASES
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, full)| *full)
        .unwrap_or(name)
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadToHeadRecord {
    pub date: String,
    pub season: String,
    pub result: char,
    pub venue: &'static str,
    pub score: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub summary: String,
    pub matches: Vec<HeadToHeadRecord>,
}

/// Historical results between `team` and `opponent` from `team`'s
/// perspective: the most recent [`H2H_HORIZON`] matches, date descending,
/// plus a "W wins, D draws, L losses" summary over those records. Returns
/// `None` when the corpus holds no pairing.
///
/// Team pairing is a containment test on normalized names rather than
/// equality: the historical dataset writes "Liverpool FC" where the
/// fantasy API says "Liverpool".
pub fn head_to_head(
    team: &str,
    opponent: &str,
    history: &[HistoricalMatch],
) -> Option<HeadToHead> {
    let team_key = normalize(canonical_team_name(team));
    let opponent_key = normalize(canonical_team_name(opponent));
    if team_key.is_empty() || opponent_key.is_empty() {
        return None;
    }

    let mut found: Vec<(NaiveDate, HeadToHeadRecord)> = Vec::new();
    for m in history {
        let home = normalize(&m.home_team);
        let away = normalize(&m.away_team);
        let is_home = home.contains(&team_key) && away.contains(&opponent_key);
        let is_away = away.contains(&team_key) && home.contains(&opponent_key);
        if !is_home && !is_away {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(&m.date, "%Y-%m-%d") else {
            continue;
        };

        let (our_goals, their_goals) = if is_home {
            (m.home_goals, m.away_goals)
        } else {
            (m.away_goals, m.home_goals)
        };
        let result = match our_goals.cmp(&their_goals) {
            std::cmp::Ordering::Greater => 'W',
            std::cmp::Ordering::Less => 'L',
            std::cmp::Ordering::Equal => 'D',
        };

        found.push((
            date,
            HeadToHeadRecord {
                date: m.date.clone(),
                season: m.season.clone(),
                result,
                venue: if is_home { "Home" } else { "Away" },
                score: m.score_string(),
            },
        ));
    }

    if found.is_empty() {
        return None;
    }
    found.sort_by(|a, b| b.0.cmp(&a.0));
    found.truncate(H2H_HORIZON);
    let records: Vec<HeadToHeadRecord> = found.into_iter().map(|(_, record)| record).collect();

    let wins = records.iter().filter(|r| r.result == 'W').count();
    let draws = records.iter().filter(|r| r.result == 'D').count();
    let losses = records.iter().filter(|r| r.result == 'L').count();
    let summary = format!("{wins} wins, {draws} draws, {losses} losses");

    Some(HeadToHead {
        summary,
        matches: records,
    })
}

use std::collections::HashMap;

use strsim::normalized_levenshtein;

use crate::fpl_fetch::Player;
use crate::normalize::normalize;

/// Minimum similarity ratio before a near-miss becomes a suggestion.
const MIN_SIMILARITY: f64 = 0.6;

/// Outcome of resolving one requested name.
#[derive(Debug)]
pub enum MatchOutcome<'a> {
    Matched(&'a Player),
    Unmatched { suggestion: Option<String> },
}

/// Index from every normalized name variant (web name, "first second",
/// surname) to its player. Later players win variant collisions. Built
/// once per request and discarded with it.
pub struct PlayerIndex<'a> {
    by_variant: HashMap<String, &'a Player>,
    // Insertion order kept separately so fuzzy ties resolve the same way
    // on every request instead of following hash iteration order.
    variant_order: Vec<String>,
}

impl<'a> PlayerIndex<'a> {
    pub fn build(players: &'a [Player]) -> Self {
        let mut by_variant = HashMap::with_capacity(players.len() * 3);
        let mut variant_order = Vec::with_capacity(players.len() * 3);
        for player in players {
            let web = normalize(&player.web_name);
            let full = normalize(&player.full_name());
            let last = normalize(&player.second_name);
            for variant in [web, full, last] {
                if variant.is_empty() {
                    continue;
                }
                if by_variant.insert(variant.clone(), player).is_none() {
                    variant_order.push(variant);
                }
            }
        }
        Self {
            by_variant,
            variant_order,
        }
    }

    /// Exact variant match first; otherwise the single best approximate
    /// variant at or above the similarity cutoff, as a suggestion only.
    pub fn lookup(&self, name: &str) -> MatchOutcome<'a> {
        let wanted = normalize(name);
        if let Some(player) = self.by_variant.get(&wanted).copied() {
            return MatchOutcome::Matched(player);
        }

        let mut best: Option<(f64, &str)> = None;
        for variant in &self.variant_order {
            let score = normalized_levenshtein(&wanted, variant);
            if score < MIN_SIMILARITY {
                continue;
            }
            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, variant));
            }
        }

        MatchOutcome::Unmatched {
            suggestion: best.map(|(_, variant)| variant.to_string()),
        }
    }
}

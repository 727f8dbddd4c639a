use std::collections::HashMap;
use std::env;

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::season::SeasonPlayerRecord;

/// Known wicketkeepers. Season records carry derived first names, so the
/// eligibility check matches either the full name or its leading token.
const DEFAULT_WICKETKEEPERS: &[&str] = &[
    "MS Dhoni",
    "Rishabh Pant",
    "Sanju Samson",
    "Dinesh Karthik",
    "KL Rahul",
    "Jos Buttler",
    "Quinton de Kock",
    "Ishan Kishan",
    "Jitesh Sharma",
    "Heinrich Klaasen",
    "Nicholas Pooran",
    "Devon Conway",
];

static WICKETKEEPERS: Lazy<Vec<String>> = Lazy::new(|| {
    match env::var("CRICORE_KEEPERS") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect(),
        _ => DEFAULT_WICKETKEEPERS
            .iter()
            .map(|name| name.to_string())
            .collect(),
    }
});

pub const ROSTER_BATSMEN: usize = 5;
pub const ROSTER_BOWLERS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: String,
    #[serde(flatten)]
    pub record: SeasonPlayerRecord,
}

/// The Team of the Season. Derived wholesale from the season records on
/// every update; there is no incremental path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonRoster {
    pub wicketkeeper: Option<RosterEntry>,
    pub batsmen: Vec<RosterEntry>,
    pub bowlers: Vec<RosterEntry>,
    pub last_updated: Option<String>,
}

/// Selects the constrained best XI from season averages. Order matters:
/// the keeper is pulled out of the pool first, batsmen come from the
/// keeper-excluded pool with no bowling filter, and bowlers are picked
/// independently from the same pool restricted to wicket-takers, so a
/// strong all-rounder can appear in both lists.
pub fn select_team_of_season(players: &HashMap<String, SeasonPlayerRecord>) -> SeasonRoster {
    let mut pool: Vec<RosterEntry> = players
        .iter()
        .map(|(key, record)| RosterEntry {
            player_id: key.clone(),
            record: record.clone(),
        })
        .collect();
    pool.sort_by(|a, b| {
        b.record
            .average_rating
            .total_cmp(&a.record.average_rating)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let wicketkeeper = pool
        .iter()
        .position(|entry| keeper_eligible(&entry.record.player_name))
        .map(|idx| pool.remove(idx));

    let batsmen: Vec<RosterEntry> = pool.iter().take(ROSTER_BATSMEN).cloned().collect();

    let mut bowlers: Vec<RosterEntry> = pool
        .iter()
        .filter(|entry| entry.record.wickets > 0)
        .cloned()
        .collect();
    bowlers.sort_by(|a, b| {
        b.record
            .average_rating
            .total_cmp(&a.record.average_rating)
            .then_with(|| b.record.wickets.cmp(&a.record.wickets))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    bowlers.truncate(ROSTER_BOWLERS);

    SeasonRoster {
        wicketkeeper,
        batsmen,
        bowlers,
        last_updated: Some(Utc::now().to_rfc3339()),
    }
}

fn keeper_eligible(player_name: &str) -> bool {
    let name = player_name.trim();
    if name.is_empty() {
        return false;
    }
    WICKETKEEPERS.iter().any(|keeper| {
        keeper == name
            || keeper
                .split_whitespace()
                .next()
                .is_some_and(|first| first == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, team: &str, avg: f64, matches: u32, wickets: u32) -> SeasonPlayerRecord {
        SeasonPlayerRecord {
            player_name: name.to_string(),
            team: team.to_string(),
            total_rating: avg * matches as f64,
            matches_played: matches,
            average_rating: avg,
            wickets,
        }
    }

    fn pool(entries: &[(&str, &str, f64, u32)]) -> HashMap<String, SeasonPlayerRecord> {
        entries
            .iter()
            .map(|(name, team, avg, wickets)| {
                (
                    format!("{name}_{team}"),
                    record(name, team, *avg, 4, *wickets),
                )
            })
            .collect()
    }

    #[test]
    fn keeper_is_pulled_from_the_pool_once() {
        let players = pool(&[
            ("Rishabh", "DC", 9.0, 0),
            ("Virat", "RCB", 8.5, 0),
            ("Rohit", "MI", 8.0, 0),
        ]);
        let roster = select_team_of_season(&players);
        let keeper = roster.wicketkeeper.expect("keeper should be selected");
        assert_eq!(keeper.record.player_name, "Rishabh");
        assert!(
            roster
                .batsmen
                .iter()
                .all(|entry| entry.player_id != keeper.player_id)
        );
    }

    #[test]
    fn no_matching_keeper_leaves_slot_absent() {
        let players = pool(&[("Virat", "RCB", 8.5, 0), ("Rohit", "MI", 8.0, 0)]);
        let roster = select_team_of_season(&players);
        assert!(roster.wicketkeeper.is_none());
        assert_eq!(roster.batsmen.len(), 2);
    }

    #[test]
    fn all_rounder_appears_in_both_lists() {
        let players = pool(&[
            ("Ravindra", "CSK", 9.2, 3),
            ("Virat", "RCB", 8.5, 0),
            ("Rohit", "MI", 8.0, 0),
            ("Shubman", "GT", 7.8, 0),
            ("Suryakumar", "MI", 7.5, 0),
            ("Yashasvi", "RR", 7.2, 0),
            ("Jasprit", "MI", 7.0, 9),
        ]);
        let roster = select_team_of_season(&players);
        let jadeja_id = "Ravindra_CSK";
        assert!(roster.batsmen.iter().any(|e| e.player_id == jadeja_id));
        assert!(roster.bowlers.iter().any(|e| e.player_id == jadeja_id));
    }

    #[test]
    fn bowler_ties_break_on_wickets() {
        let players = pool(&[
            ("Jasprit", "MI", 8.0, 12),
            ("Mohammed", "GT", 8.0, 18),
            ("Yuzvendra", "RR", 7.0, 10),
        ]);
        let roster = select_team_of_season(&players);
        assert_eq!(roster.bowlers[0].record.player_name, "Mohammed");
        assert_eq!(roster.bowlers[1].record.player_name, "Jasprit");
    }

    #[test]
    fn short_pools_return_short_lists() {
        let players = pool(&[("Virat", "RCB", 8.5, 0), ("Jasprit", "MI", 7.0, 9)]);
        let roster = select_team_of_season(&players);
        assert_eq!(roster.batsmen.len(), 2);
        assert_eq!(roster.bowlers.len(), 1);
        assert!(roster.last_updated.is_some());
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Running season totals for one player, keyed by the canonical player
/// key within a season. `player_name` and `team` hold the latest values
/// seen; records are never removed inside a season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonPlayerRecord {
    pub player_name: String,
    pub team: String,
    pub total_rating: f64,
    pub matches_played: u32,
    pub average_rating: f64,
    #[serde(default)]
    pub wickets: u32,
}

/// Per-season aggregation context. Built from the persisted season map,
/// mutated for one update cycle, then written back whole; nothing lives
/// across cycles in process memory.
#[derive(Debug, Clone, Default)]
pub struct SeasonTally {
    players: HashMap<String, SeasonPlayerRecord>,
}

impl SeasonTally {
    pub fn from_records(players: HashMap<String, SeasonPlayerRecord>) -> Self {
        Self { players }
    }

    pub fn into_records(self) -> HashMap<String, SeasonPlayerRecord> {
        self.players
    }

    pub fn records(&self) -> &HashMap<String, SeasonPlayerRecord> {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Folds one match result into the season totals. Deliberately not
    /// idempotent: submitting the same match twice double-counts, exactly
    /// like the store it replaces. Returns the key that was updated, or
    /// `None` when no canonical key can be derived from the name.
    pub fn accumulate(
        &mut self,
        player_name: &str,
        team: &str,
        score: f64,
        wickets: u32,
    ) -> Option<String> {
        let key = player_key(player_name, team)?;
        let first = first_name(player_name)?;
        let record = self
            .players
            .entry(key.clone())
            .or_insert_with(|| SeasonPlayerRecord {
                player_name: first.clone(),
                team: team.trim().to_string(),
                total_rating: 0.0,
                matches_played: 0,
                average_rating: 0.0,
                wickets: 0,
            });
        record.player_name = first;
        record.team = team.trim().to_string();
        record.total_rating += score;
        record.matches_played += 1;
        record.average_rating = record.total_rating / record.matches_played as f64;
        record.wickets += wickets;
        Some(key)
    }
}

/// Canonical season key: first name + team. This mirrors the persisted
/// store's historical keying and is known to collide for two players who
/// share a first name and a team; a stable upstream identifier is the
/// preferred key when the collaborator can guarantee one.
pub fn player_key(player_name: &str, team: &str) -> Option<String> {
    let first = first_name(player_name)?;
    let team = team.trim();
    Some(format!("{first}_{team}"))
}

/// First whitespace token of the display name, after stripping a trailing
/// parenthetical role suffix such as `(c)`, `(wk)` or `(IP)`.
pub fn first_name(player_name: &str) -> Option<String> {
    let cleaned = strip_role_suffix(player_name);
    let first = cleaned.split_whitespace().next()?;
    Some(first.to_string())
}

pub fn strip_role_suffix(player_name: &str) -> &str {
    let trimmed = player_name.trim();
    if let Some(open) = trimmed.rfind('(')
        && trimmed.ends_with(')')
    {
        return trimmed[..open].trim_end();
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_suffixes_are_stripped_before_keying() {
        assert_eq!(strip_role_suffix("MS Dhoni (c)"), "MS Dhoni");
        assert_eq!(strip_role_suffix("Sanju Samson (wk)"), "Sanju Samson");
        assert_eq!(strip_role_suffix("Virat Kohli"), "Virat Kohli");
        assert_eq!(
            player_key("Rishabh Pant (wk)", "Delhi Capitals").as_deref(),
            Some("Rishabh_Delhi Capitals")
        );
    }

    #[test]
    fn blank_name_produces_no_key() {
        assert_eq!(player_key("   ", "Team"), None);
        assert_eq!(player_key("(c)", "Team"), None);
    }

    #[test]
    fn accumulate_double_counts_on_resubmission() {
        let mut tally = SeasonTally::default();
        tally.accumulate("Ruturaj Gaikwad", "Chennai Super Kings", 6.0, 0);
        tally.accumulate("Ruturaj Gaikwad", "Chennai Super Kings", 6.0, 0);
        let record = &tally.records()["Ruturaj_Chennai Super Kings"];
        assert_eq!(record.matches_played, 2);
        assert_eq!(record.total_rating, 12.0);
        assert_eq!(record.average_rating, 6.0);
    }

    #[test]
    fn average_recomputed_and_attributes_overwritten() {
        let mut tally = SeasonTally::default();
        tally.accumulate("Hardik Pandya", "Gujarat Titans", 8.0, 1);
        tally.accumulate("Hardik Pandya (c)", "Gujarat Titans", 4.0, 2);
        let record = &tally.records()["Hardik_Gujarat Titans"];
        assert_eq!(record.matches_played, 2);
        assert_eq!(record.average_rating, 6.0);
        assert_eq!(record.wickets, 3);
        assert_eq!(record.player_name, "Hardik");
    }

    #[test]
    fn same_first_name_same_team_collides() {
        // Documented fragility of the name-derived key: two players who
        // share a first name and a team land on one record.
        let mut tally = SeasonTally::default();
        tally.accumulate("Rahul Tripathi", "Sunrisers Hyderabad", 5.0, 0);
        tally.accumulate("Rahul Chahar", "Sunrisers Hyderabad", 7.0, 0);
        assert_eq!(tally.len(), 1);
        assert_eq!(
            tally.records()["Rahul_Sunrisers Hyderabad"].matches_played,
            2
        );
    }
}

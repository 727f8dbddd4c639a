use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scorecard::{RawBattingEntry, RawBowlingEntry};

/// Batting side of a player's match contribution. Numeric fields default
/// to 0; `balls = 0` is how "did not face a ball" is told apart from a
/// scoreless stay at the crease.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattingLine {
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BowlingLine {
    pub overs: f64,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub maidens: u32,
    pub economy: f64,
    pub dot_balls: u32,
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: u32,
}

/// One player's canonical contribution in one match. A missing side means
/// the player never appeared on that card, which is different from an
/// all-zero line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMatchStat {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
    pub batting: Option<BattingLine>,
    pub bowling: Option<BowlingLine>,
    pub is_winning_team: bool,
}

impl PlayerMatchStat {
    pub fn wickets(&self) -> u32 {
        self.bowling.as_ref().map(|b| b.wickets).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub players: Vec<PlayerMatchStat>,
    /// Card entries that carried no player identifier at all. They cannot
    /// be attributed, so they are skipped rather than aborting the batch.
    pub dropped: usize,
}

/// Merges batting and bowling card entries keyed by player identifier.
/// A player appearing on both cards gets one bundle with both lines; the
/// missing side stays `None`. Card order is preserved (batting card first,
/// then bowling-only players).
pub fn merge_player_stats(
    batting: &[RawBattingEntry],
    bowling: &[RawBowlingEntry],
    winning_team: &str,
) -> MergeOutcome {
    let winning_team = winning_team.trim();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out = MergeOutcome::default();

    for entry in batting {
        let id = entry.player_id.trim();
        if id.is_empty() {
            out.dropped += 1;
            continue;
        }
        let team = entry.team.trim().to_string();
        let stat = PlayerMatchStat {
            player_id: id.to_string(),
            player_name: entry.player_name.trim().to_string(),
            is_winning_team: !team.is_empty() && team == winning_team,
            team,
            batting: Some(batting_line(entry)),
            bowling: None,
        };
        match index.get(id) {
            Some(&slot) => out.players[slot].batting = Some(batting_line(entry)),
            None => {
                index.insert(id.to_string(), out.players.len());
                out.players.push(stat);
            }
        }
    }

    for entry in bowling {
        let id = entry.player_id.trim();
        if id.is_empty() {
            out.dropped += 1;
            continue;
        }
        if let Some(&slot) = index.get(id) {
            let player = &mut out.players[slot];
            player.bowling = Some(bowling_line(entry));
            if player.team.is_empty() {
                player.team = entry.team.trim().to_string();
                player.is_winning_team = !player.team.is_empty() && player.team == winning_team;
            }
        } else {
            let team = entry.team.trim().to_string();
            index.insert(id.to_string(), out.players.len());
            out.players.push(PlayerMatchStat {
                player_id: id.to_string(),
                player_name: entry.player_name.trim().to_string(),
                is_winning_team: !team.is_empty() && team == winning_team,
                team,
                batting: None,
                bowling: Some(bowling_line(entry)),
            });
        }
    }

    out
}

fn batting_line(entry: &RawBattingEntry) -> BattingLine {
    BattingLine {
        runs: entry.runs,
        balls: entry.balls,
        fours: entry.fours,
        sixes: entry.sixes,
        strike_rate: entry.strike_rate,
        catches: entry.catches,
        stumpings: entry.stumpings,
        run_outs: entry.run_outs,
    }
}

fn bowling_line(entry: &RawBowlingEntry) -> BowlingLine {
    BowlingLine {
        overs: entry.overs,
        runs_conceded: entry.runs_conceded,
        wickets: entry.wickets,
        maidens: entry.maidens,
        economy: entry.economy,
        dot_balls: entry.dot_balls,
        catches: entry.catches,
        stumpings: entry.stumpings,
        run_outs: entry.run_outs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bat(id: &str, name: &str, team: &str) -> RawBattingEntry {
        RawBattingEntry {
            player_id: id.to_string(),
            player_name: name.to_string(),
            team: team.to_string(),
            runs: 30,
            balls: 20,
            ..Default::default()
        }
    }

    fn bowl(id: &str, name: &str, team: &str) -> RawBowlingEntry {
        RawBowlingEntry {
            player_id: id.to_string(),
            player_name: name.to_string(),
            team: team.to_string(),
            overs: 4.0,
            wickets: 2,
            ..Default::default()
        }
    }

    #[test]
    fn both_cards_attach_to_one_bundle() {
        let merged = merge_player_stats(
            &[bat("7", " Ravindra Jadeja ", "Chennai Super Kings")],
            &[bowl("7", "Ravindra Jadeja", "Chennai Super Kings")],
            "Chennai Super Kings",
        );
        assert_eq!(merged.players.len(), 1);
        assert_eq!(merged.dropped, 0);
        let player = &merged.players[0];
        assert_eq!(player.player_name, "Ravindra Jadeja");
        assert!(player.batting.is_some());
        assert!(player.bowling.is_some());
        assert!(player.is_winning_team);
    }

    #[test]
    fn missing_identifier_is_dropped_not_fatal() {
        let merged = merge_player_stats(
            &[bat("", "Unknown", "Mumbai Indians"), bat("9", "Rohit", "Mumbai Indians")],
            &[],
            "Chennai Super Kings",
        );
        assert_eq!(merged.players.len(), 1);
        assert_eq!(merged.dropped, 1);
        assert!(!merged.players[0].is_winning_team);
    }

    #[test]
    fn bowling_only_player_has_absent_batting() {
        let merged = merge_player_stats(&[], &[bowl("31", "Bumrah", "Mumbai Indians")], "X");
        assert_eq!(merged.players.len(), 1);
        assert!(merged.players[0].batting.is_none());
        assert_eq!(merged.players[0].wickets(), 2);
    }
}

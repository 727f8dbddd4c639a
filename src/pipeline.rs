use std::path::Path;

use anyhow::{Context, Result};

use crate::extract::{self, PlayerMatchStat};
use crate::normalize;
use crate::rating::{self, RatingBreakdown};
use crate::scorecard::InningsCard;
use crate::season::SeasonTally;
use crate::store;
use crate::tots::{self, SeasonRoster};

/// One player's fully rated match line: the raw weighted score with its
/// audit breakdown, plus the percentile-normalized display rating.
#[derive(Debug, Clone)]
pub struct MatchRating {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
    pub wickets: u32,
    pub breakdown: RatingBreakdown,
    pub display_rating: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RatedMatch {
    /// Players ordered by raw score, best first.
    pub players: Vec<MatchRating>,
    pub dropped: usize,
}

/// Rates every player on the combined match cards and normalizes the raw
/// scores into display ratings. An empty card set rates to an empty match;
/// the normalizer is only invoked when at least one player was rated.
pub fn rate_match(cards: &InningsCard, winning_team: &str) -> Result<RatedMatch> {
    let merged = extract::merge_player_stats(&cards.batting, &cards.bowling, winning_team);
    if merged.dropped > 0 {
        eprintln!(
            "[WARN] {} scorecard entries had no player identifier and were skipped",
            merged.dropped
        );
    }
    if merged.players.is_empty() {
        return Ok(RatedMatch {
            players: Vec::new(),
            dropped: merged.dropped,
        });
    }

    let rated: Vec<(PlayerMatchStat, RatingBreakdown)> = merged
        .players
        .into_iter()
        .map(|stat| {
            let breakdown = rating::rate(&stat);
            (stat, breakdown)
        })
        .collect();

    let scores: Vec<(String, f64)> = rated
        .iter()
        .map(|(stat, breakdown)| (stat.player_id.clone(), breakdown.total_score))
        .collect();
    let display = normalize::display_ratings(&scores).context("normalize match ratings")?;

    let mut players: Vec<MatchRating> = rated
        .into_iter()
        .map(|(stat, breakdown)| MatchRating {
            display_rating: display.get(&stat.player_id).copied().unwrap_or(0.0),
            wickets: stat.wickets(),
            player_id: stat.player_id,
            player_name: stat.player_name,
            team: stat.team,
            breakdown,
        })
        .collect();
    players.sort_by(|a, b| {
        b.breakdown
            .total_score
            .total_cmp(&a.breakdown.total_score)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    Ok(RatedMatch {
        players,
        dropped: merged.dropped,
    })
}

/// Folds a rated match into the persisted season state and recomputes the
/// Team of the Season. The flow is read-modify-write over the whole store:
/// players and roster land in one atomic file replace, so a failure at any
/// point leaves the previous season state (roster included) untouched.
///
/// Submitting the same match twice double-counts by design; callers own
/// deduplication. Concurrent callers are not coordinated: last write wins.
pub fn update_season(
    store_path: &Path,
    season: &str,
    rated: &RatedMatch,
) -> Result<SeasonRoster> {
    let mut file = store::load_store(store_path)?;
    let data = file.season_mut(season);

    let mut tally = SeasonTally::from_records(std::mem::take(&mut data.players));
    for player in &rated.players {
        if tally
            .accumulate(
                &player.player_name,
                &player.team,
                player.breakdown.total_score,
                player.wickets,
            )
            .is_none()
        {
            eprintln!(
                "[WARN] no season key for player {:?} ({}), skipping",
                player.player_name, player.team
            );
        }
    }

    data.players = tally.into_records();
    let roster = tots::select_team_of_season(&data.players);
    data.roster = Some(roster.clone());

    store::save_store(store_path, &file)?;
    Ok(roster)
}

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cricore::season::{SeasonPlayerRecord, SeasonTally};
use cricore::store::{self, StoreFile};
use cricore::tots;

fn temp_store(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "cricore_test_{}_{}.json",
        name,
        std::process::id()
    ));
    let _ = fs::remove_file(&path);
    path
}

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

#[test]
fn missing_store_reads_as_empty() {
    let path = temp_store("missing");
    let file = store::load_store(&path).expect("missing file should read as empty");
    assert!(file.seasons.is_empty());
}

#[test]
fn store_round_trips_players_and_roster() {
    let path = temp_store("roundtrip");

    let mut tally = SeasonTally::default();
    tally.accumulate("Jos Buttler", "Rajasthan Royals", 8.4, 0);
    tally.accumulate("Yuzvendra Chahal", "Rajasthan Royals", 7.1, 3);

    let mut file = StoreFile::default();
    let season = file.season_mut("2025");
    season.players = tally.into_records();
    season.roster = Some(tots::select_team_of_season(&season.players));
    store::save_store(&path, &file).expect("save should succeed");

    let loaded = store::load_store(&path).expect("load should succeed");
    let season = loaded.season("2025").expect("season should exist");
    assert_eq!(season.players.len(), 2);
    let roster = season.roster.as_ref().expect("roster should persist");
    assert_eq!(
        roster
            .wicketkeeper
            .as_ref()
            .map(|k| k.record.player_name.as_str()),
        Some("Jos")
    );
    assert_eq!(roster.bowlers.len(), 1);

    let _ = fs::remove_file(&path);
}

#[test]
fn version_mismatch_reads_as_empty() {
    let path = temp_store("version");
    fs::write(&path, r#"{"version":99,"seasons":{"2025":{"players":{}}}}"#)
        .expect("write should succeed");
    let file = store::load_store(&path).expect("mismatched version should read as empty");
    assert!(file.seasons.is_empty());
    let _ = fs::remove_file(&path);
}

#[test]
fn corrupt_store_is_an_error_not_a_reset() {
    let path = temp_store("corrupt");
    fs::write(&path, "{not json").expect("write should succeed");
    assert!(store::load_store(&path).is_err());
    let _ = fs::remove_file(&path);
}

#[test]
fn roster_selection_ignores_zero_wicket_players_for_bowling() {
    let players: HashMap<String, SeasonPlayerRecord> = [
        ("Virat_RCB".to_string(), record("Virat", "RCB", 9.0, 5, 0)),
        ("Kuldeep_DC".to_string(), record("Kuldeep", "DC", 6.5, 5, 11)),
    ]
    .into_iter()
    .collect();
    let roster = tots::select_team_of_season(&players);
    assert_eq!(roster.bowlers.len(), 1);
    assert_eq!(roster.bowlers[0].record.player_name, "Kuldeep");
    // The zero-wicket batter still tops the batting list.
    assert_eq!(roster.batsmen[0].record.player_name, "Virat");
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use cricore::pipeline;
use cricore::scorecard::{self, InningsCard};
use cricore::{export, store};

const DEFAULT_SEASON: &str = "2025";

fn main() -> Result<()> {
    let innings_paths = innings_args();
    if innings_paths.is_empty() {
        eprintln!(
            "usage: season_report --winner=TEAM [--season=YEAR] [--store=PATH] [--xlsx=PATH] INNINGS_JSON..."
        );
        return Err(anyhow!("no innings files given"));
    }
    let winning_team =
        flag_value("--winner").ok_or_else(|| anyhow!("--winner=TEAM is required"))?;
    let season = flag_value("--season").unwrap_or_else(|| DEFAULT_SEASON.to_string());
    let store_path = flag_value("--store")
        .map(PathBuf::from)
        .or_else(store::default_store_path)
        .context("unable to resolve season store path")?;

    let mut cards = InningsCard::default();
    for path in &innings_paths {
        let raw = fs::read_to_string(path).with_context(|| format!("read innings {path}"))?;
        let card = scorecard::parse_innings_json(&raw)
            .with_context(|| format!("parse innings {path}"))?;
        if card.is_empty() {
            eprintln!("[WARN] innings {path} held no card entries");
        }
        cards.extend(card);
    }

    let rated = pipeline::rate_match(&cards, &winning_team)?;
    if rated.players.is_empty() {
        return Err(anyhow!("no ratable players in the given innings"));
    }

    println!("Match ratings ({} players, winner: {winning_team})", rated.players.len());
    for player in &rated.players {
        println!(
            "  {:<28} {:<26} raw {:>6.2}  rating {:>4.1}",
            player.player_name, player.team, player.breakdown.total_score, player.display_rating
        );
    }

    let roster = pipeline::update_season(&store_path, &season, &rated)?;
    println!();
    println!("Team of the Season {season} (store: {})", store_path.display());
    match &roster.wicketkeeper {
        Some(keeper) => println!(
            "  WK      {:<20} {:<26} avg {:.2}",
            keeper.record.player_name, keeper.record.team, keeper.record.average_rating
        ),
        None => println!("  WK      (none matched)"),
    }
    for entry in &roster.batsmen {
        println!(
            "  BAT     {:<20} {:<26} avg {:.2}",
            entry.record.player_name, entry.record.team, entry.record.average_rating
        );
    }
    for entry in &roster.bowlers {
        println!(
            "  BOWL    {:<20} {:<26} avg {:.2}  wkts {}",
            entry.record.player_name,
            entry.record.team,
            entry.record.average_rating,
            entry.record.wickets
        );
    }

    if let Some(xlsx) = flag_value("--xlsx") {
        let file = store::load_store(&store_path)?;
        let players: Vec<_> = file
            .season(&season)
            .map(|data| {
                data.players
                    .iter()
                    .map(|(key, record)| (key.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default();
        let report =
            export::export_season(PathBuf::from(&xlsx).as_path(), &season, &players, Some(&roster))?;
        println!();
        println!(
            "Exported {} players and {} roster rows to {xlsx}",
            report.players, report.roster_rows
        );
    }

    Ok(())
}

fn innings_args() -> Vec<String> {
    std::env::args()
        .skip(1)
        .filter(|arg| !arg.starts_with("--"))
        .collect()
}

// Flags use the --flag=value form only; bare positionals are innings files.
fn flag_value(flag: &str) -> Option<String> {
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix(&format!("{flag}=")) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

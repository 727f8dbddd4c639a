use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::season::SeasonPlayerRecord;
use crate::tots::{RosterEntry, SeasonRoster};

pub struct ExportReport {
    pub players: usize,
    pub roster_rows: usize,
}

/// Writes a season's ratings and roster to an xlsx workbook with two
/// sheets: `Ratings` (every season record, best average first) and
/// `TeamOfSeason` (keeper, batsmen, bowlers with their slots).
pub fn export_season(
    path: &Path,
    season: &str,
    players: &[(String, SeasonPlayerRecord)],
    roster: Option<&SeasonRoster>,
) -> Result<ExportReport> {
    let mut ratings_rows = vec![vec![
        "Season".to_string(),
        "Player Key".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Matches".to_string(),
        "Total Rating".to_string(),
        "Average Rating".to_string(),
        "Wickets".to_string(),
    ]];
    let mut sorted: Vec<&(String, SeasonPlayerRecord)> = players.iter().collect();
    sorted.sort_by(|a, b| {
        b.1.average_rating
            .total_cmp(&a.1.average_rating)
            .then_with(|| a.0.cmp(&b.0))
    });
    for (key, record) in sorted {
        ratings_rows.push(vec![
            season.to_string(),
            key.clone(),
            record.player_name.clone(),
            record.team.clone(),
            record.matches_played.to_string(),
            format!("{:.2}", record.total_rating),
            format!("{:.2}", record.average_rating),
            record.wickets.to_string(),
        ]);
    }

    let mut roster_rows = vec![vec![
        "Season".to_string(),
        "Slot".to_string(),
        "Rank".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Average Rating".to_string(),
        "Wickets".to_string(),
        "Last Updated".to_string(),
    ]];
    if let Some(roster) = roster {
        let updated = roster.last_updated.clone().unwrap_or_default();
        if let Some(keeper) = roster.wicketkeeper.as_ref() {
            roster_rows.push(roster_row(season, "Wicketkeeper", 1, keeper, &updated));
        }
        for (idx, entry) in roster.batsmen.iter().enumerate() {
            roster_rows.push(roster_row(season, "Batsman", idx + 1, entry, &updated));
        }
        for (idx, entry) in roster.bowlers.iter().enumerate() {
            roster_rows.push(roster_row(season, "Bowler", idx + 1, entry, &updated));
        }
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ratings")?;
        write_rows(sheet, &ratings_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TeamOfSeason")?;
        write_rows(sheet, &roster_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: ratings_rows.len().saturating_sub(1),
        roster_rows: roster_rows.len().saturating_sub(1),
    })
}

fn roster_row(
    season: &str,
    slot: &str,
    rank: usize,
    entry: &RosterEntry,
    updated: &str,
) -> Vec<String> {
    vec![
        season.to_string(),
        slot.to_string(),
        rank.to_string(),
        entry.record.player_name.clone(),
        entry.record.team.clone(),
        format!("{:.2}", entry.record.average_rating),
        entry.record.wickets.to_string(),
        updated.to_string(),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}

use anyhow::{Context, Result};
use serde_json::Value;

/// One row of a batting card as the feed delivers it. Numeric fields
/// arrive as numbers or strings depending on the feed vintage, so the
/// parser normalizes both.
#[derive(Debug, Clone, Default)]
pub struct RawBattingEntry {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub catches: u32,
    pub stumpings: u32,
    pub run_outs: u32,
}

/// One row of a bowling card as the feed delivers it.
#[derive(Debug, Clone, Default)]
pub struct RawBowlingEntry {
    pub player_id: String,
    pub player_name: String,
    pub team: String,
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

#[derive(Debug, Clone, Default)]
pub struct InningsCard {
    pub batting: Vec<RawBattingEntry>,
    pub bowling: Vec<RawBowlingEntry>,
}

impl InningsCard {
    pub fn is_empty(&self) -> bool {
        self.batting.is_empty() && self.bowling.is_empty()
    }

    /// Appends another innings, keeping card order. Used to combine
    /// Innings1 + Innings2 into one match-wide card set.
    pub fn extend(&mut self, other: InningsCard) {
        self.batting.extend(other.batting);
        self.bowling.extend(other.bowling);
    }
}

/// Parses one innings payload. The caller hands this the already-unwrapped
/// JSON body; the payload is either `{"Innings1": {...}}` / `{"Innings2":
/// {...}}` or the bare innings object with `BattingCard` / `BowlingCard`
/// arrays. Empty and `null` bodies parse to an empty card.
pub fn parse_innings_json(raw: &str) -> Result<InningsCard> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(InningsCard::default());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid innings json")?;
    let innings = innings_object(&root);

    let batting = innings
        .get("BattingCard")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().map(parse_batting_entry).collect())
        .unwrap_or_default();
    let bowling = innings
        .get("BowlingCard")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().map(parse_bowling_entry).collect())
        .unwrap_or_default();

    Ok(InningsCard { batting, bowling })
}

/// The feed nests the innings under a key like `Innings1`; older dumps hand
/// over the innings object directly.
fn innings_object(root: &Value) -> &Value {
    if let Some(obj) = root.as_object() {
        for (key, value) in obj {
            if key.starts_with("Innings") && value.is_object() {
                return value;
            }
        }
    }
    root
}

fn parse_batting_entry(row: &Value) -> RawBattingEntry {
    RawBattingEntry {
        player_id: pick_id(row, &["PlayerID", "PlayerId"]).unwrap_or_default(),
        player_name: pick_string(row, &["PlayerName"]).unwrap_or_default(),
        team: pick_string(row, &["TeamName"]).unwrap_or_default(),
        runs: pick_u32(row, &["Runs"]).unwrap_or(0),
        balls: pick_u32(row, &["Balls"]).unwrap_or(0),
        fours: pick_u32(row, &["Fours"]).unwrap_or(0),
        sixes: pick_u32(row, &["Sixes"]).unwrap_or(0),
        strike_rate: pick_f64(row, &["StrikeRate"]).unwrap_or(0.0),
        catches: pick_u32(row, &["Catches"]).unwrap_or(0),
        stumpings: pick_u32(row, &["Stumpings"]).unwrap_or(0),
        run_outs: pick_u32(row, &["RunOuts"]).unwrap_or(0),
    }
}

fn parse_bowling_entry(row: &Value) -> RawBowlingEntry {
    RawBowlingEntry {
        player_id: pick_id(row, &["PlayerID", "PlayerId"]).unwrap_or_default(),
        player_name: pick_string(row, &["PlayerName"]).unwrap_or_default(),
        team: pick_string(row, &["TeamName"]).unwrap_or_default(),
        overs: pick_f64(row, &["Overs"]).unwrap_or(0.0),
        runs_conceded: pick_u32(row, &["Runs"]).unwrap_or(0),
        wickets: pick_u32(row, &["Wickets"]).unwrap_or(0),
        maidens: pick_u32(row, &["Maidens"]).unwrap_or(0),
        economy: pick_f64(row, &["Economy"]).unwrap_or(0.0),
        dot_balls: pick_u32(row, &["DotBalls"]).unwrap_or(0),
        catches: pick_u32(row, &["Catches"]).unwrap_or(0),
        stumpings: pick_u32(row, &["Stumpings"]).unwrap_or(0),
        run_outs: pick_u32(row, &["RunOuts"]).unwrap_or(0),
    }
}

/// Player ids show up as strings or numbers; both map to the string form.
fn pick_id(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(s) = v.as_str() {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            if let Some(num) = v.as_u64() {
                return Some(num.to_string());
            }
        }
    }
    None
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = value.get(*key).and_then(Value::as_str) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return Some(num as u32);
            }
            if let Some(s) = v.as_str()
                && let Ok(num) = s.trim().parse::<u32>()
            {
                return Some(num);
            }
        }
    }
    None
}

fn pick_f64(value: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_f64() {
                return Some(num);
            }
            if let Some(s) = v.as_str()
                && let Ok(num) = s.trim().parse::<f64>()
            {
                return Some(num);
            }
        }
    }
    None
}

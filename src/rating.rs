use serde::{Deserialize, Serialize};

use crate::extract::{BattingLine, BowlingLine, PlayerMatchStat};

pub const BATTING_WEIGHT: f64 = 0.50;
pub const BOWLING_WEIGHT: f64 = 0.40;
pub const FIELDING_WEIGHT: f64 = 0.10;

const WIN_BONUS: f64 = 1.5;
const LOSS_PENALTY: f64 = -0.5;

/// One labelled contribution to a player's raw score, kept for audit and
/// display. The total is never reconstructed from these; they explain it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingComponent {
    pub label: String,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingBreakdown {
    pub total_score: f64,
    pub batting_points: f64,
    pub bowling_points: f64,
    /// Fielding points plus the match-impact adjustment. The original
    /// scoring folds the win/loss adjustment into this bucket before the
    /// 0.10 weight is applied; that arithmetic is kept as-is for
    /// compatibility with historical ratings.
    pub fielding_points: f64,
    pub components: Vec<RatingComponent>,
}

/// Computes the weighted raw score for one player's match contribution.
///
/// `total = 0.50 * batting + 0.40 * bowling + 0.10 * (fielding + impact)`
pub fn rate(stat: &PlayerMatchStat) -> RatingBreakdown {
    let mut components = Vec::new();

    let batting_points = stat
        .batting
        .as_ref()
        .map(|bat| batting_component(bat, &mut components))
        .unwrap_or(0.0);
    let bowling_points = stat
        .bowling
        .as_ref()
        .map(|bowl| bowling_component(bowl, &mut components))
        .unwrap_or(0.0);
    let fielding = fielding_component(stat, &mut components);
    let impact = match_impact(stat.is_winning_team, &mut components);
    let fielding_points = fielding + impact;

    RatingBreakdown {
        total_score: BATTING_WEIGHT * batting_points
            + BOWLING_WEIGHT * bowling_points
            + FIELDING_WEIGHT * fielding_points,
        batting_points,
        bowling_points,
        fielding_points,
        components,
    }
}

fn batting_component(bat: &BattingLine, components: &mut Vec<RatingComponent>) -> f64 {
    let runs = bat.runs as f64;
    let balls = bat.balls;
    let strike_rate = bat.strike_rate;
    let mut score = 0.0;

    push(components, "runs", runs * 0.1);
    score += runs * 0.1;

    // Highest matching strike-rate band wins; 100..120 is neutral and the
    // slow-scoring penalty only applies once the stay is long enough.
    if strike_rate >= 200.0 {
        push(components, "strike_rate_200", 1.0);
        score += 1.0;
    } else if strike_rate >= 180.0 {
        push(components, "strike_rate_180", 0.8);
        score += 0.8;
    } else if strike_rate >= 150.0 {
        push(components, "strike_rate_150", 0.6);
        score += 0.6;
    } else if strike_rate >= 120.0 {
        push(components, "strike_rate_120", 0.4);
        score += 0.4;
    } else if strike_rate < 100.0 && balls >= 10 {
        push(components, "strike_rate_low", -0.2);
        score += -0.2;
    }

    push(components, "fours", bat.fours as f64 * 0.4);
    push(components, "sixes", bat.sixes as f64 * 0.6);
    score += bat.fours as f64 * 0.4 + bat.sixes as f64 * 0.6;

    if bat.runs >= 100 {
        push(components, "century", 1.6);
        score += 1.6;
    } else if bat.runs >= 75 {
        push(components, "seventy_five", 1.2);
        score += 1.2;
    } else if bat.runs >= 50 {
        push(components, "half_century", 0.8);
        score += 0.8;
    } else if bat.runs >= 25 {
        push(components, "twenty_five", 0.4);
        score += 0.4;
    }

    if bat.runs == 0 && balls > 0 {
        push(components, "duck", -0.2);
        score += -0.2;
    }

    score
}

fn bowling_component(bowl: &BowlingLine, components: &mut Vec<RatingComponent>) -> f64 {
    let wickets = bowl.wickets;
    let mut score = 0.0;

    push(components, "wickets", wickets as f64 * 2.5);
    score += wickets as f64 * 2.5;

    if wickets >= 5 {
        push(components, "five_for", 1.2);
        score += 1.2;
    } else if wickets == 4 {
        push(components, "four_for", 0.8);
        score += 0.8;
    } else if wickets == 3 {
        push(components, "three_for", 0.4);
        score += 0.4;
    }

    // Economy bands are checked in this order; the first match wins.
    if bowl.overs > 0.0 {
        let economy = effective_economy(bowl);
        let band = if (1.0..=5.0).contains(&economy) {
            Some(0.8)
        } else if (1.0..6.0).contains(&economy) {
            Some(0.6)
        } else if (1.0..7.0).contains(&economy) {
            Some(0.4)
        } else if (10.0..=11.0).contains(&economy) {
            Some(-0.2)
        } else if economy > 11.0 && economy <= 12.0 {
            Some(-0.4)
        } else if economy > 12.0 {
            Some(-0.6)
        } else {
            None
        };
        if let Some(points) = band {
            push(components, "economy", points);
            score += points;
        }
    }

    push(components, "dot_balls", bowl.dot_balls as f64 * 0.2);
    push(components, "maidens", bowl.maidens as f64 * 1.5);
    score += bowl.dot_balls as f64 * 0.2 + bowl.maidens as f64 * 1.5;

    score
}

/// The feed usually supplies economy; when it does not, derive it from
/// runs conceded per over.
fn effective_economy(bowl: &BowlingLine) -> f64 {
    if bowl.economy > 0.0 {
        bowl.economy
    } else if bowl.overs > 0.0 {
        bowl.runs_conceded as f64 / bowl.overs
    } else {
        0.0
    }
}

/// Fielding actions are credited on whichever card the feed attached them
/// to, so both sides are summed.
fn fielding_component(stat: &PlayerMatchStat, components: &mut Vec<RatingComponent>) -> f64 {
    let bat = stat.batting.as_ref();
    let bowl = stat.bowling.as_ref();
    let catches = bat.map(|b| b.catches).unwrap_or(0) + bowl.map(|b| b.catches).unwrap_or(0);
    let stumpings = bat.map(|b| b.stumpings).unwrap_or(0) + bowl.map(|b| b.stumpings).unwrap_or(0);
    let run_outs = bat.map(|b| b.run_outs).unwrap_or(0) + bowl.map(|b| b.run_outs).unwrap_or(0);

    push(components, "catches", catches as f64 * 1.0);
    push(components, "stumpings", stumpings as f64 * 1.5);
    push(components, "run_outs", run_outs as f64 * 1.2);

    catches as f64 * 1.0 + stumpings as f64 * 1.5 + run_outs as f64 * 1.2
}

fn match_impact(is_winning_team: bool, components: &mut Vec<RatingComponent>) -> f64 {
    if is_winning_team {
        push(components, "won_match", WIN_BONUS);
        WIN_BONUS
    } else {
        push(components, "lost_match", LOSS_PENALTY);
        LOSS_PENALTY
    }
}

fn push(components: &mut Vec<RatingComponent>, label: &str, points: f64) {
    if points != 0.0 {
        components.push(RatingComponent {
            label: label.to_string(),
            points,
        });
    }
}

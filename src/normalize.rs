use std::collections::HashMap;

use anyhow::{Result, bail};

pub const RATING_FLOOR: f64 = 3.0;
pub const RATING_CEIL: f64 = 10.0;
pub const NEUTRAL_RATING: f64 = 6.5;

/// Maps one match's raw scores onto the 3.0-10.0 display scale using
/// percentile banding with linear interpolation inside each band.
///
/// Percentile cut points use `sorted[floor(N * p)]` with no interpolation
/// between ranks, matching the historical ratings. When every score is
/// identical the distribution carries no signal and everyone gets the
/// neutral 6.5.
///
/// An empty set has no defined normalization; callers must skip the call
/// when a match produced no rated players.
pub fn display_ratings(scores: &[(String, f64)]) -> Result<HashMap<String, f64>> {
    if scores.is_empty() {
        bail!("cannot normalize an empty rating set");
    }

    let mut sorted: Vec<f64> = scores.iter().map(|(_, s)| *s).collect();
    sorted.sort_by(f64::total_cmp);
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    if max == min {
        return Ok(scores
            .iter()
            .map(|(id, _)| (id.clone(), NEUTRAL_RATING))
            .collect());
    }

    let cuts = PercentileCuts::from_sorted(&sorted);
    Ok(scores
        .iter()
        .map(|(id, score)| (id.clone(), cuts.band_rating(*score, min, max)))
        .collect())
}

#[derive(Debug, Clone, Copy)]
struct PercentileCuts {
    p10: f64,
    p25: f64,
    p50: f64,
    p75: f64,
    p90: f64,
}

impl PercentileCuts {
    fn from_sorted(sorted: &[f64]) -> Self {
        Self {
            p10: rank_value(sorted, 0.10),
            p25: rank_value(sorted, 0.25),
            p50: rank_value(sorted, 0.50),
            p75: rank_value(sorted, 0.75),
            p90: rank_value(sorted, 0.90),
        }
    }

    fn band_rating(&self, score: f64, min: f64, max: f64) -> f64 {
        if score >= self.p90 {
            let rating = 9.0 + band_fraction(score - self.p90, max - self.p90);
            rating.min(RATING_CEIL)
        } else if score >= self.p75 {
            8.0 + band_fraction(score - self.p75, self.p90 - self.p75)
        } else if score >= self.p50 {
            7.0 + band_fraction(score - self.p50, self.p75 - self.p50)
        } else if score >= self.p25 {
            6.0 + band_fraction(score - self.p25, self.p50 - self.p25)
        } else if score >= self.p10 {
            5.0 + band_fraction(score - self.p10, self.p25 - self.p10)
        } else {
            RATING_FLOOR + band_fraction(score - min, self.p10 - min) * 2.0
        }
    }
}

fn rank_value(sorted: &[f64], percentile: f64) -> f64 {
    let idx = ((sorted.len() as f64) * percentile).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// In-band position in [0, 1]. Small matches often collapse adjacent cut
/// points to the same value; a zero-width band clamps to its lower bound
/// instead of producing NaN.
fn band_fraction(offset: f64, width: f64) -> f64 {
    if width <= 0.0 { 0.0 } else { offset / width }
}

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::clustering::Clustering;
use crate::error::{ClustervalError, Result};
use crate::score;

/// F-scores of randomized candidates against a gold clustering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
    pub runs: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Scores `runs` random redistributions of `candidate` (same cluster count,
/// see [`Clustering::randomize`]) against `gold`.
///
/// Gives the chance level a real candidate should beat.
pub fn random_baseline<R: Rng>(
    gold: &Clustering,
    candidate: &Clustering,
    runs: usize,
    rng: &mut R,
) -> Result<Baseline> {
    if runs == 0 {
        return Err(ClustervalError::InvalidArgument(
            "baseline needs at least one run".into(),
        ));
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for _ in 0..runs {
        let shuffled = candidate.randomize(None, rng)?;
        let s = score::f_score(gold, &shuffled);
        sum += s;
        min = min.min(s);
        max = max.max(s);
    }

    let baseline = Baseline {
        runs,
        mean: sum / runs as f64,
        min,
        max,
    };
    debug!(runs, mean = baseline.mean, "computed random baseline");
    Ok(baseline)
}

//! Precision, recall and F-score between clusters and clusterings.
//!
//! All functions are pure. Ratios against an empty cluster are undefined
//! and come back as `None` rather than NaN.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::cluster::Cluster;
use crate::clustering::Clustering;
use crate::item::Item;

/// Label of the cluster that collects gold items the candidate never mentions.
pub const MISSING_LABEL: &str = "missing";

/// Number of distinct items of `a` that also appear in `b`.
fn overlap(a: &Cluster, b: &Cluster) -> usize {
    let other: HashSet<&Item> = b.items().iter().collect();
    let mut counted: HashSet<&Item> = HashSet::with_capacity(a.len());
    a.items()
        .iter()
        .filter(|item| other.contains(item) && counted.insert(*item))
        .count()
}

/// Precision of `b` with respect to `a`: `|a ∩ b| / |a|`.
///
/// Returns `None` when `a` is empty.
pub fn precision(a: &Cluster, b: &Cluster) -> Option<f64> {
    if a.is_empty() {
        return None;
    }
    Some(overlap(a, b) as f64 / a.len() as f64)
}

/// Recall of `b` with respect to `a`: `|a ∩ b| / |b|`.
///
/// Returns `None` when `b` is empty.
pub fn recall(a: &Cluster, b: &Cluster) -> Option<f64> {
    if b.is_empty() {
        return None;
    }
    Some(overlap(a, b) as f64 / b.len() as f64)
}

/// Harmonic mean of [`precision`] and [`recall`].
///
/// Returns `None` when either ratio is undefined or both are zero.
pub fn f(a: &Cluster, b: &Cluster) -> Option<f64> {
    let p = precision(a, b)?;
    let r = recall(a, b)?;
    let sum = p + r;
    if sum == 0.0 {
        return None;
    }
    Some(2.0 * p * r / sum)
}

/// Best-matching candidate cluster for `cluster`: its index and F value.
///
/// Undefined comparisons are skipped. On ties the later cluster wins.
pub fn best_match(cluster: &Cluster, clustering: &Clustering) -> Option<(usize, f64)> {
    clustering
        .clusters()
        .iter()
        .enumerate()
        .filter_map(|(i, other)| f(cluster, other).map(|v| (i, v)))
        .max_by(|(_, x), (_, y)| x.total_cmp(y))
}

/// F-score of a single gold cluster against a whole clustering: the best
/// defined [`f`] over all its clusters, or `0.0` if none is defined.
pub fn f_single(cluster: &Cluster, clustering: &Clustering) -> f64 {
    best_match(cluster, clustering).map_or(0.0, |(_, v)| v)
}

/// A candidate extended with the gold items it was missing.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub clustering: Clustering,
    /// Number of gold items that were absent from the candidate.
    pub missing: usize,
}

/// Copies `candidate` and appends every gold item it lacks as one extra
/// cluster labeled [`MISSING_LABEL`]. Nothing is appended when the candidate
/// already covers the gold items.
pub fn reconcile(gold: &Clustering, candidate: &Clustering) -> Reconciled {
    let missing: Vec<Item> = gold
        .items()
        .iter()
        .filter(|item| !candidate.contains(item))
        .cloned()
        .collect();

    let mut clustering = candidate.clone();
    let count = missing.len();
    if count > 0 {
        debug!(missing = count, "adding missing gold items to candidate");
        clustering.add(Cluster::new(missing, Some(MISSING_LABEL.to_string())));
    }

    Reconciled {
        clustering,
        missing: count,
    }
}

/// How one gold cluster scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub size: usize,
    /// `size / |reconciled candidate items|`.
    pub weight: f64,
    /// Best F value against any candidate cluster.
    pub f: f64,
    /// Index of the best-matching cluster in the reconciled candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<usize>,
}

/// Detailed result of scoring a candidate against a gold clustering.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub f_score: f64,
    /// Gold items the candidate did not contain.
    pub missing: usize,
    pub gold_clusters: usize,
    pub candidate_clusters: usize,
    pub matches: Vec<ClusterMatch>,
    /// The candidate as scored, including any `missing` cluster.
    #[serde(skip)]
    pub reconciled: Clustering,
}

/// Scores `candidate` against `gold` and reports per-cluster detail.
///
/// The candidate is reconciled on a copy (see [`reconcile`]); the caller's
/// clustering is never modified.
pub fn evaluate(gold: &Clustering, candidate: &Clustering) -> Evaluation {
    let Reconciled {
        clustering: reconciled,
        missing,
    } = reconcile(gold, candidate);

    let total = reconciled.items().len();
    let matches: Vec<ClusterMatch> = gold
        .clusters()
        .iter()
        .map(|cluster| {
            let best = best_match(cluster, &reconciled);
            ClusterMatch {
                label: cluster.label().map(str::to_string),
                size: cluster.len(),
                weight: if total == 0 {
                    0.0
                } else {
                    cluster.len() as f64 / total as f64
                },
                f: best.map_or(0.0, |(_, v)| v),
                best: best.map(|(i, _)| i),
            }
        })
        .collect();

    let f_score = matches.iter().fold(0.0, |acc, m| acc + m.weight * m.f);

    Evaluation {
        f_score,
        missing,
        gold_clusters: gold.len(),
        candidate_clusters: candidate.len(),
        matches,
        reconciled,
    }
}

/// F-score of `candidate` against `gold`:
/// `Σ_{c ∈ gold} (|c| / |candidate items|) · f_single(c, candidate)`,
/// computed after reconciling missing gold items on a copy.
pub fn f_score(gold: &Clustering, candidate: &Clustering) -> f64 {
    evaluate(gold, candidate).f_score
}

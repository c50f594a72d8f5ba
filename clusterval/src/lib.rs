//! Clustering evaluation against a gold standard.
//!
//! Compares a candidate partition of items with a gold partition and reports
//! precision, recall and F-score. Items are opaque identifiers.
//!
//! # Usage
//!
//! ```
//! use giztoy_clusterval::{Clustering, score};
//!
//! let gold = Clustering::from_text(":1 2 3\n:4 5 6", false);
//! let candidate = Clustering::from_text(":1 2\n:3 5 6\n:4", false);
//!
//! let f = candidate.f_score(&gold);
//! assert!((f - 11.0 / 15.0).abs() < 1e-9);
//! assert_eq!(f, score::f_score(&gold, &candidate));
//! ```
//!
//! # Scoring
//!
//! For each gold cluster the best F value against any candidate cluster is
//! taken, and the results are summed weighted by gold cluster size over the
//! number of candidate items. Gold items the candidate never mentions are
//! first collected into an extra `missing` cluster on a copy of the
//! candidate (see [`score::reconcile`]).
//!
//! # File formats
//!
//! Text files hold one cluster per line (`label: item item ...`, see
//! [`text`]). `.yaml`, `.yml` and `.json` files hold a persisted structure
//! (see [`persist`]).

mod baseline;
mod cluster;
mod clustering;
mod error;
mod item;
mod options;
pub mod persist;
pub mod score;
pub mod text;

#[cfg(test)]
mod tests;

pub use baseline::{Baseline, random_baseline};
pub use cluster::Cluster;
pub use clustering::Clustering;
pub use error::{ClustervalError, Result};
pub use item::Item;
pub use options::{Format, LoadOptions};
pub use score::{Evaluation, evaluate};

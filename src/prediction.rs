//! Ranking of per-category scores.
//!
//! # Examples
//!
//! ```
//! use kopis::prediction::to_ranked_predictions;
//! use std::collections::BTreeMap;
//!
//! let scores = BTreeMap::from([
//!     ("x".to_string(), -1.0),
//!     ("y".to_string(), -0.2),
//!     ("z".to_string(), -5.0),
//! ]);
//!
//! let ranked = to_ranked_predictions(&scores);
//! let order: Vec<&str> = ranked.iter().map(|p| p.category.as_str()).collect();
//! assert_eq!(order, vec!["y", "x", "z"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A candidate category with its log-probability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Category label.
    pub category: String,
    /// Unnormalized log-probability.
    pub score: f64,
}

impl Prediction {
    /// Create a new prediction.
    pub fn new<S: Into<String>>(category: S, score: f64) -> Self {
        Prediction {
            category: category.into(),
            score,
        }
    }
}

/// Order scores from highest to lowest.
///
/// The sort is stable and uses a total order on `f64`, so categories with
/// equal scores keep the map's lexicographic order and every entry appears
/// exactly once.
pub fn to_ranked_predictions(scores: &BTreeMap<String, f64>) -> Vec<Prediction> {
    let mut predictions: Vec<Prediction> = scores
        .iter()
        .map(|(category, &score)| Prediction::new(category.clone(), score))
        .collect();
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
    predictions
}

/// The `k` highest scoring predictions.
pub fn top_k(scores: &BTreeMap<String, f64>, k: usize) -> Vec<Prediction> {
    let mut predictions = to_ranked_predictions(scores);
    predictions.truncate(k);
    predictions
}

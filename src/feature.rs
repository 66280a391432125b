//! Feature statistics and chi-square feature selection.
//!
//! [`extract_stats`] aggregates per-category document counts and per-feature
//! per-category co-occurrence counts over a dataset. [`chisquare`] then tests
//! every feature for independence from every category and keeps the features
//! whose score reaches the critical level. [`select_features`] combines the
//! test with pruning and returns a new, smaller [`FeatureStats`].
//!
//! # Examples
//!
//! ```
//! use kopis::document::Document;
//! use kopis::feature::{extract_stats, select_features};
//! use std::collections::HashMap;
//!
//! let doc = |category: &str, words: &[&str]| {
//!     let tokens: HashMap<String, usize> = words.iter().map(|w| (w.to_string(), 1)).collect();
//!     Document::new(tokens).with_category(category)
//! };
//!
//! let mut dataset = Vec::new();
//! for _ in 0..6 {
//!     dataset.push(doc("sports", &["ball", "match"]));
//!     dataset.push(doc("finance", &["stock", "match"]));
//! }
//!
//! let stats = extract_stats(&dataset);
//! assert_eq!(stats.n, 12);
//!
//! let (pruned, scores) = select_features(&stats, 10.83);
//! assert!(scores.contains_key("ball"));
//! assert!(!pruned.contains_feature("match")); // present everywhere, no signal
//! ```

mod selection;
mod stats;

pub use selection::{DEFAULT_CRITICAL_VALUE, chisquare, chisquare_score, select_features};
pub use stats::{FeatureStats, extract_stats};

//! # Kopis
//!
//! A multinomial Naive Bayes text classifier with chi-square feature
//! selection.
//!
//! ## Features
//!
//! - Pluggable text analysis pipeline
//! - Chi-square feature selection
//! - Laplace-smoothed log-space scoring
//! - Optional category priors
//! - JSON and binary model persistence

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod document;
pub mod error;
pub mod feature;
pub mod persistence;
pub mod prediction;

pub mod prelude {
    pub use crate::classifier::{KnowledgeBase, NaiveBayes, NaiveBayesConfig, TextClassifier};
    pub use crate::document::{Document, TextTokenizer};
    pub use crate::error::{KopisError, Result};
    pub use crate::persistence::ModelFormat;
    pub use crate::prediction::Prediction;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Naive Bayes text classification.
//!
//! # Architecture
//!
//! - [`TextClassifier`] trait: common interface for trained classifiers
//! - [`NaiveBayes`]: multinomial Naive Bayes with chi-square feature selection
//! - [`KnowledgeBase`]: the trained parameters, the only state prediction needs
//! - [`NaiveBayesConfig`]: training configuration
//!
//! Training runs in one batch pass:
//!
//! ```text
//! examples → TextTokenizer → Documents → extract_stats → select_features
//!          → log priors + Laplace-smoothed log likelihoods → KnowledgeBase
//! ```

mod config;
mod knowledge_base;
mod naive_bayes;
mod text_classifier;

pub use config::NaiveBayesConfig;
pub use knowledge_base::KnowledgeBase;
pub use naive_bayes::NaiveBayes;
pub use text_classifier::TextClassifier;

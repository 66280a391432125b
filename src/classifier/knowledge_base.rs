//! Trained Naive Bayes parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{KopisError, Result};

/// Everything needed to classify text without retraining.
///
/// `log_likelihoods` is dense: every retained feature has a value for every
/// category of `log_priors`. Category maps are ordered, which fixes the
/// iteration order used for tie-breaking and keeps serialized models stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Number of training documents.
    pub n: usize,
    /// Vocabulary size after feature selection.
    pub d: usize,
    /// Number of categories.
    pub c: usize,
    /// Natural log of each category's prior probability.
    pub log_priors: BTreeMap<String, f64>,
    /// Natural log of P(feature | category), smoothed.
    pub log_likelihoods: BTreeMap<String, BTreeMap<String, f64>>,
}

impl KnowledgeBase {
    /// Categories in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.log_priors.keys().map(String::as_str)
    }

    /// Check if a feature is part of the vocabulary.
    pub fn contains_feature(&self, feature: &str) -> bool {
        self.log_likelihoods.contains_key(feature)
    }

    /// Log likelihood of `feature` given `category`.
    pub fn log_likelihood(&self, feature: &str, category: &str) -> Option<f64> {
        self.log_likelihoods
            .get(feature)
            .and_then(|by_category| by_category.get(category))
            .copied()
    }

    /// Score every category for a tokenized document.
    ///
    /// Each score starts at the category's log prior; every token that is part
    /// of the vocabulary adds its occurrence count times its log likelihood.
    /// Tokens outside the vocabulary contribute nothing.
    pub fn category_scores(&self, doc: &Document) -> BTreeMap<String, f64> {
        let known: Vec<(&BTreeMap<String, f64>, f64)> = doc
            .tokens
            .iter()
            .filter_map(|(token, &occurrences)| {
                self.log_likelihoods
                    .get(token)
                    .map(|by_category| (by_category, occurrences as f64))
            })
            .collect();

        self.log_priors
            .iter()
            .map(|(category, &log_prior)| {
                let mut score = log_prior;
                for (by_category, occurrences) in &known {
                    if let Some(log_likelihood) = by_category.get(category) {
                        score += occurrences * log_likelihood;
                    }
                }
                (category.clone(), score)
            })
            .collect()
    }

    /// The category with the highest score for a tokenized document.
    ///
    /// Only a strictly greater score replaces the current best, so ties go to
    /// the lexicographically first category.
    pub fn best_category(&self, doc: &Document) -> Result<String> {
        let scores = self.category_scores(doc);
        let mut entries = scores.into_iter();
        let (mut best_category, mut best_score) = entries.next().ok_or(KopisError::EmptyModel)?;

        for (category, score) in entries {
            if score > best_score {
                best_score = score;
                best_category = category;
            }
        }

        Ok(best_category)
    }

    /// The `k` features with the highest log likelihood for a category.
    pub fn top_features(&self, category: &str, k: usize) -> Vec<(String, f64)> {
        let mut features: Vec<(String, f64)> = self
            .log_likelihoods
            .keys()
            .filter_map(|feature| {
                self.log_likelihood(feature, category)
                    .map(|value| (feature.clone(), value))
            })
            .collect();
        features.sort_by(|a, b| b.1.total_cmp(&a.1));
        features.truncate(k);
        features
    }

    /// Check that every stored log value is finite.
    ///
    /// Priors of zero probability are stored as negative infinity, which some
    /// formats cannot represent.
    pub fn is_finite(&self) -> bool {
        self.log_priors.values().all(|v| v.is_finite())
            && self
                .log_likelihoods
                .values()
                .flat_map(|by_category| by_category.values())
                .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn knowledge_base() -> KnowledgeBase {
        let log_priors = BTreeMap::from([
            ("finance".to_string(), 0.5f64.ln()),
            ("sports".to_string(), 0.5f64.ln()),
        ]);
        let log_likelihoods = BTreeMap::from([
            (
                "ball".to_string(),
                BTreeMap::from([
                    ("finance".to_string(), 0.1f64.ln()),
                    ("sports".to_string(), 0.6f64.ln()),
                ]),
            ),
            (
                "stock".to_string(),
                BTreeMap::from([
                    ("finance".to_string(), 0.9f64.ln()),
                    ("sports".to_string(), 0.4f64.ln()),
                ]),
            ),
        ]);
        KnowledgeBase {
            n: 4,
            d: 2,
            c: 2,
            log_priors,
            log_likelihoods,
        }
    }

    fn doc(tokens: &[(&str, usize)]) -> Document {
        Document::new(
            tokens
                .iter()
                .map(|(t, c)| (t.to_string(), *c))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn test_category_scores_weight_by_occurrences() {
        let kb = knowledge_base();
        let scores = kb.category_scores(&doc(&[("ball", 2), ("unknown", 5)]));

        let expected_sports = 0.5f64.ln() + 2.0 * 0.6f64.ln();
        let expected_finance = 0.5f64.ln() + 2.0 * 0.1f64.ln();
        assert_eq!(scores["sports"], expected_sports);
        assert_eq!(scores["finance"], expected_finance);
    }

    #[test]
    fn test_log_likelihood_lookup() {
        let kb = knowledge_base();
        assert_eq!(kb.log_likelihood("stock", "finance"), Some(0.9f64.ln()));
        assert_eq!(kb.log_likelihood("stock", "weather"), None);
        assert_eq!(kb.log_likelihood("bond", "finance"), None);
    }

    #[test]
    fn test_best_category() {
        let kb = knowledge_base();
        assert_eq!(kb.best_category(&doc(&[("ball", 1)])).unwrap(), "sports");
        assert_eq!(kb.best_category(&doc(&[("stock", 1)])).unwrap(), "finance");
    }

    #[test]
    fn test_ties_go_to_first_category() {
        let kb = knowledge_base();
        // Only unknown tokens: both scores equal their (equal) priors.
        assert_eq!(kb.best_category(&doc(&[("weather", 3)])).unwrap(), "finance");
    }

    #[test]
    fn test_all_negative_infinity_still_returns_category() {
        let mut kb = knowledge_base();
        for prior in kb.log_priors.values_mut() {
            *prior = f64::NEG_INFINITY;
        }
        assert_eq!(kb.best_category(&doc(&[])).unwrap(), "finance");
        assert!(!kb.is_finite());
    }

    #[test]
    fn test_empty_model() {
        let kb = KnowledgeBase::default();
        assert!(matches!(
            kb.best_category(&doc(&[("ball", 1)])),
            Err(KopisError::EmptyModel)
        ));
    }

    #[test]
    fn test_top_features() {
        let kb = knowledge_base();
        let top = kb.top_features("sports", 1);
        assert_eq!(top, vec![("ball".to_string(), 0.6f64.ln())]);
        assert_eq!(kb.top_features("finance", 5).len(), 2);
        assert!(kb.top_features("weather", 5).is_empty());
    }
}

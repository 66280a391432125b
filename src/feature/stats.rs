//! Aggregated counts over a tokenized dataset.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};

use crate::document::Document;

/// Counts gathered from a dataset, consumed by feature selection and training.
///
/// Category-keyed maps are ordered so iteration is lexicographic. Absent
/// counts read as zero through [`FeatureStats::category_count`] and
/// [`FeatureStats::joint_count`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureStats {
    /// Total number of documents seen.
    pub n: usize,
    /// Number of documents per category.
    pub category_counts: BTreeMap<String, usize>,
    /// Number of documents of each category containing each feature.
    pub feature_category_joint_count: AHashMap<String, BTreeMap<String, usize>>,
}

impl FeatureStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document into the counts.
    ///
    /// A feature contributes one to its joint count however many times it
    /// occurs in the document, so joint counts are document frequencies.
    pub fn add_document(&mut self, doc: &Document) {
        self.n += 1;
        *self
            .category_counts
            .entry(doc.category.clone())
            .or_insert(0) += 1;

        for feature in doc.tokens.keys() {
            *self
                .feature_category_joint_count
                .entry(feature.clone())
                .or_default()
                .entry(doc.category.clone())
                .or_insert(0) += 1;
        }
    }

    /// Number of documents in a category, zero for unknown categories.
    pub fn category_count(&self, category: &str) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Number of documents of `category` containing `feature`, zero when absent.
    pub fn joint_count(&self, feature: &str, category: &str) -> usize {
        self.feature_category_joint_count
            .get(feature)
            .and_then(|counts| counts.get(category))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `feature` across all categories.
    pub fn feature_document_count(&self, feature: &str) -> usize {
        self.feature_category_joint_count
            .get(feature)
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }

    /// Check if a feature is present in the statistics.
    pub fn contains_feature(&self, feature: &str) -> bool {
        self.feature_category_joint_count.contains_key(feature)
    }

    /// Number of distinct features.
    pub fn num_features(&self) -> usize {
        self.feature_category_joint_count.len()
    }

    /// Number of distinct categories.
    pub fn num_categories(&self) -> usize {
        self.category_counts.len()
    }

    /// Build a copy that keeps only the features in `selected`.
    ///
    /// Document and category counts are carried over unchanged; the receiver is
    /// left untouched so the pre-selection counts stay available.
    pub fn retain_features<'a, I>(&self, selected: I) -> FeatureStats
    where
        I: IntoIterator<Item = &'a String>,
    {
        let selected: AHashSet<&String> = selected.into_iter().collect();
        let feature_category_joint_count = self
            .feature_category_joint_count
            .iter()
            .filter(|(feature, _)| selected.contains(feature))
            .map(|(feature, counts)| (feature.clone(), counts.clone()))
            .collect();

        FeatureStats {
            n: self.n,
            category_counts: self.category_counts.clone(),
            feature_category_joint_count,
        }
    }
}

/// Aggregate counts over every document of the dataset.
///
/// No document is skipped: one without tokens still counts towards `n` and
/// its category.
pub fn extract_stats(dataset: &[Document]) -> FeatureStats {
    let mut stats = FeatureStats::new();
    for doc in dataset {
        stats.add_document(doc);
    }
    stats
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn doc(category: &str, tokens: &[(&str, usize)]) -> Document {
        let tokens: HashMap<String, usize> =
            tokens.iter().map(|(t, c)| (t.to_string(), *c)).collect();
        Document::new(tokens).with_category(category)
    }

    #[test]
    fn test_extract_stats_counts() {
        let dataset = vec![
            doc("sports", &[("ball", 3), ("goal", 1)]),
            doc("sports", &[("ball", 1)]),
            doc("finance", &[("stock", 2), ("ball", 1)]),
            doc("finance", &[]),
        ];

        let stats = extract_stats(&dataset);

        assert_eq!(stats.n, 4);
        assert_eq!(stats.category_count("sports"), 2);
        assert_eq!(stats.category_count("finance"), 2);
        assert_eq!(stats.category_count("weather"), 0);
        assert_eq!(stats.category_counts.values().sum::<usize>(), stats.n);

        assert_eq!(stats.joint_count("ball", "sports"), 2);
        assert_eq!(stats.joint_count("ball", "finance"), 1);
        assert_eq!(stats.joint_count("stock", "finance"), 1);
        assert_eq!(stats.joint_count("stock", "sports"), 0);
        assert_eq!(stats.joint_count("unknown", "sports"), 0);
        assert_eq!(stats.feature_document_count("ball"), 3);
        assert_eq!(stats.num_features(), 3);
    }

    #[test]
    fn test_joint_counts_never_exceed_n() {
        let dataset = vec![
            doc("a", &[("x", 10), ("y", 1)]),
            doc("b", &[("x", 7)]),
            doc("a", &[("x", 1), ("z", 4)]),
        ];

        let stats = extract_stats(&dataset);
        for feature in stats.feature_category_joint_count.keys() {
            assert!(stats.feature_document_count(feature) <= stats.n);
        }
        assert_eq!(stats.feature_document_count("x"), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let stats = extract_stats(&[]);
        assert_eq!(stats.n, 0);
        assert_eq!(stats.num_categories(), 0);
        assert_eq!(stats.num_features(), 0);
    }

    #[test]
    fn test_extract_stats_is_order_independent() {
        let a = doc("a", &[("x", 1)]);
        let b = doc("b", &[("x", 2), ("y", 1)]);

        let forward = extract_stats(&[a.clone(), b.clone()]);
        let backward = extract_stats(&[b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_retain_features_leaves_source_untouched() {
        let dataset = vec![doc("a", &[("x", 1), ("y", 1)]), doc("b", &[("y", 1)])];
        let stats = extract_stats(&dataset);

        let keep = vec!["x".to_string()];
        let pruned = stats.retain_features(&keep);

        assert_eq!(pruned.num_features(), 1);
        assert!(pruned.contains_feature("x"));
        assert!(!pruned.contains_feature("y"));
        assert_eq!(pruned.n, stats.n);
        assert_eq!(pruned.category_counts, stats.category_counts);
        assert_eq!(stats.num_features(), 2);
    }
}

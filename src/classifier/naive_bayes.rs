//! Multinomial Naive Bayes with chi-square feature selection.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::classifier::config::NaiveBayesConfig;
use crate::classifier::knowledge_base::KnowledgeBase;
use crate::classifier::text_classifier::TextClassifier;
use crate::document::{Document, TextTokenizer};
use crate::error::{KopisError, Result};
use crate::feature::{FeatureStats, extract_stats, select_features};
use crate::prediction::{Prediction, to_ranked_predictions};

/// Multinomial Naive Bayes text classifier.
///
/// Training replaces the knowledge base wholesale; a failed training call
/// leaves the previous one in place. Prediction only reads it, and the
/// trained parameters are shared behind an `Arc`.
///
/// # Examples
///
/// ```
/// use kopis::classifier::{NaiveBayes, NaiveBayesConfig};
/// use std::collections::BTreeMap;
///
/// let mut dataset = BTreeMap::new();
/// dataset.insert("sports".to_string(), vec!["ball goal".to_string(); 6]);
/// dataset.insert("finance".to_string(), vec!["stock bond".to_string(); 6]);
///
/// let mut classifier = NaiveBayes::new().unwrap();
/// classifier.train(&dataset).unwrap();
///
/// assert_eq!(classifier.predict("what a goal").unwrap(), "sports");
/// assert_eq!(classifier.predict("bond yields").unwrap(), "finance");
/// ```
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    config: NaiveBayesConfig,
    tokenizer: TextTokenizer,
    knowledge_base: Option<Arc<KnowledgeBase>>,
}

impl NaiveBayes {
    /// Create an untrained classifier with the standard analyzer and default
    /// configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(NaiveBayesConfig::default())
    }

    /// Create an untrained classifier with the standard analyzer.
    pub fn with_config(config: NaiveBayesConfig) -> Result<Self> {
        Ok(Self::with_tokenizer(TextTokenizer::standard()?, config))
    }

    /// Create an untrained classifier with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: TextTokenizer, config: NaiveBayesConfig) -> Self {
        NaiveBayes {
            config,
            tokenizer,
            knowledge_base: None,
        }
    }

    /// Create a classifier from an already trained knowledge base.
    ///
    /// The knowledge base must have been trained with the same tokenization,
    /// here the standard analyzer.
    pub fn from_knowledge_base(knowledge_base: KnowledgeBase) -> Result<Self> {
        Ok(Self::new()?.with_knowledge_base(knowledge_base))
    }

    /// Replace the knowledge base.
    pub fn with_knowledge_base(mut self, knowledge_base: KnowledgeBase) -> Self {
        self.knowledge_base = Some(Arc::new(knowledge_base));
        self
    }

    /// Get the trained knowledge base, if any.
    pub fn knowledge_base(&self) -> Option<&Arc<KnowledgeBase>> {
        self.knowledge_base.as_ref()
    }

    /// Check if the classifier holds a knowledge base.
    pub fn is_trained(&self) -> bool {
        self.knowledge_base.is_some()
    }

    /// Get the configuration.
    pub fn config(&self) -> &NaiveBayesConfig {
        &self.config
    }

    /// Get the chi-square critical value used for feature selection.
    pub fn chisquare_critical_value(&self) -> f64 {
        self.config.chisquare_critical_value
    }

    /// Set the chi-square critical value used by the next training run.
    pub fn set_chisquare_critical_value(&mut self, critical_value: f64) {
        self.config.chisquare_critical_value = critical_value;
    }

    /// Train on a dataset of category to example texts, estimating the
    /// priors from the category frequencies.
    pub fn train(&mut self, dataset: &BTreeMap<String, Vec<String>>) -> Result<()> {
        self.fit(dataset, None)
    }

    /// Train with caller-supplied prior probabilities.
    ///
    /// `priors` needs exactly one probability in `[0, 1]` per category that
    /// has at least one example; anything else fails with
    /// [`KopisError::InvalidPriors`] and leaves the classifier unchanged.
    pub fn train_with_priors(
        &mut self,
        dataset: &BTreeMap<String, Vec<String>>,
        priors: &BTreeMap<String, f64>,
    ) -> Result<()> {
        self.fit(dataset, Some(priors))
    }

    fn fit(
        &mut self,
        dataset: &BTreeMap<String, Vec<String>>,
        priors: Option<&BTreeMap<String, f64>>,
    ) -> Result<()> {
        self.config.validate()?;

        let documents = self.preprocess_dataset(dataset)?;
        let stats = extract_stats(&documents);
        let (selected, _) = select_features(&stats, self.config.chisquare_critical_value);

        let knowledge_base = build_knowledge_base(&selected, priors)?;
        info!(
            "trained naive bayes: n={}, d={}, c={}",
            knowledge_base.n, knowledge_base.d, knowledge_base.c
        );

        self.knowledge_base = Some(Arc::new(knowledge_base));
        Ok(())
    }

    /// Tokenize every example and tag it with its category.
    fn preprocess_dataset(&self, dataset: &BTreeMap<String, Vec<String>>) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(dataset.values().map(Vec::len).sum());

        for (category, examples) in dataset {
            if examples.is_empty() {
                warn!("category '{category}' has no examples and will not be learned");
            }
            for example in examples {
                let doc = self.tokenizer.tokenize(example)?;
                documents.push(doc.with_category(category.clone()));
            }
        }

        debug!(
            "preprocessed {} documents in {} categories",
            documents.len(),
            dataset.len()
        );
        Ok(documents)
    }

    fn require_knowledge_base(&self) -> Result<&KnowledgeBase> {
        self.knowledge_base
            .as_deref()
            .ok_or(KopisError::NotTrained)
    }

    /// Predict the most likely category of a text.
    pub fn predict(&self, text: &str) -> Result<String> {
        let knowledge_base = self.require_knowledge_base()?;
        let doc = self.tokenizer.tokenize(text)?;
        knowledge_base.best_category(&doc)
    }

    /// Score every category for a text.
    pub fn predict_scores(&self, text: &str) -> Result<BTreeMap<String, f64>> {
        let knowledge_base = self.require_knowledge_base()?;
        let doc = self.tokenizer.tokenize(text)?;
        Ok(knowledge_base.category_scores(&doc))
    }

    /// Every category with its score, best first.
    pub fn predict_ranked(&self, text: &str) -> Result<Vec<Prediction>> {
        Ok(to_ranked_predictions(&self.predict_scores(text)?))
    }
}

impl TextClassifier for NaiveBayes {
    fn predict(&self, text: &str) -> Result<String> {
        NaiveBayes::predict(self, text)
    }

    fn predict_ranked(&self, text: &str) -> Result<Vec<Prediction>> {
        NaiveBayes::predict_ranked(self, text)
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}

/// Estimate the model parameters from feature-selected statistics.
fn build_knowledge_base(
    stats: &FeatureStats,
    priors: Option<&BTreeMap<String, f64>>,
) -> Result<KnowledgeBase> {
    let n = stats.n;
    let d = stats.num_features();

    let log_priors = match priors {
        Some(priors) => validated_log_priors(stats, priors)?,
        None => stats
            .category_counts
            .iter()
            .map(|(category, &count)| (category.clone(), (count as f64 / n as f64).ln()))
            .collect(),
    };
    let c = log_priors.len();

    // Laplace smoothing needs the total feature occurrences of each category.
    let mut category_feature_mass: BTreeMap<&str, usize> =
        log_priors.keys().map(|category| (category.as_str(), 0)).collect();
    for counts in stats.feature_category_joint_count.values() {
        for (category, mass) in category_feature_mass.iter_mut() {
            *mass += counts.get(*category).copied().unwrap_or(0);
        }
    }

    let mut log_likelihoods: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for (feature, counts) in &stats.feature_category_joint_count {
        let by_category = category_feature_mass
            .iter()
            .map(|(&category, &mass)| {
                let count = counts.get(category).copied().unwrap_or(0) as f64;
                let log_likelihood = ((count + 1.0) / (mass as f64 + d as f64)).ln();
                (category.to_string(), log_likelihood)
            })
            .collect();
        log_likelihoods.insert(feature.clone(), by_category);
    }

    Ok(KnowledgeBase {
        n,
        d,
        c,
        log_priors,
        log_likelihoods,
    })
}

/// Check caller-supplied priors against the observed categories and take
/// their logarithm.
fn validated_log_priors(
    stats: &FeatureStats,
    priors: &BTreeMap<String, f64>,
) -> Result<BTreeMap<String, f64>> {
    if let Some((category, probability)) = priors
        .iter()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(KopisError::invalid_priors(format!(
            "prior probability of '{category}' is {probability}, expected a value between 0 and 1"
        )));
    }

    if priors.len() != stats.num_categories() {
        return Err(KopisError::invalid_priors(format!(
            "got {} priors for {} categories, pass one prior per category",
            priors.len(),
            stats.num_categories()
        )));
    }

    if let Some(category) = stats
        .category_counts
        .keys()
        .find(|category| !priors.contains_key(*category))
    {
        return Err(KopisError::invalid_priors(format!(
            "missing prior for category '{category}'"
        )));
    }

    Ok(priors
        .iter()
        .map(|(category, &probability)| (category.clone(), probability.ln()))
        .collect())
}

//! Text classifier trait definition.

use crate::error::Result;
use crate::prediction::Prediction;

/// Common interface of trained text classifiers.
pub trait TextClassifier: Send + Sync {
    /// Predict the most likely category of a text.
    fn predict(&self, text: &str) -> Result<String>;

    /// Every known category with its score, best first.
    fn predict_ranked(&self, text: &str) -> Result<Vec<Prediction>>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

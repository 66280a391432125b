//! Documents: one example reduced to a category label and token counts.
//!
//! [`TextTokenizer`] is the bridge between the analysis layer and the
//! classifier. It runs an [`Analyzer`] over raw text and folds the resulting
//! tokens into a [`Document`] whose category is left empty for the caller to
//! assign.
//!
//! # Examples
//!
//! ```
//! use kopis::document::TextTokenizer;
//!
//! let tokenizer = TextTokenizer::standard().unwrap();
//! let doc = tokenizer.tokenize("Goal! Another goal for the home team").unwrap();
//!
//! assert_eq!(doc.count("goal"), 2);
//! assert_eq!(doc.count("the"), 0); // stop word
//! assert!(doc.category.is_empty());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::Result;

/// A tokenized example: category label plus token occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Category label. Empty until assigned during dataset preprocessing.
    pub category: String,
    /// Token to occurrence count within this example.
    pub tokens: HashMap<String, usize>,
}

impl Document {
    /// Create an unlabeled document from token counts.
    pub fn new(tokens: HashMap<String, usize>) -> Self {
        Document {
            category: String::new(),
            tokens,
        }
    }

    /// Assign the category label.
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    /// Occurrence count of a token, zero when absent.
    pub fn count(&self, token: &str) -> usize {
        self.tokens.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Converts raw text into [`Document`]s using an analyzer.
#[derive(Clone)]
pub struct TextTokenizer {
    analyzer: Arc<dyn Analyzer>,
}

impl TextTokenizer {
    /// Create a tokenizer backed by the given analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        TextTokenizer { analyzer }
    }

    /// Create a tokenizer backed by the [`StandardAnalyzer`].
    pub fn standard() -> Result<Self> {
        Ok(Self::new(Arc::new(StandardAnalyzer::new()?)))
    }

    /// Tokenize raw text into an unlabeled document.
    ///
    /// Tokens marked as stopped by a filter are not counted.
    pub fn tokenize(&self, text: &str) -> Result<Document> {
        let mut tokens: HashMap<String, usize> = HashMap::new();
        for token in self.analyzer.analyze(text)? {
            if token.is_stopped() || token.is_empty() {
                continue;
            }
            *tokens.entry(token.text).or_insert(0) += 1;
        }
        Ok(Document::new(tokens))
    }
}

impl std::fmt::Debug for TextTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextTokenizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::PipelineAnalyzer;
    use crate::analysis::token_filter::stop::StopFilter;
    use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;

    #[test]
    fn test_tokenize_counts_occurrences() {
        let tokenizer = TextTokenizer::standard().unwrap();
        let doc = tokenizer.tokenize("Stock, stock and BOND.").unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.count("stock"), 2);
        assert_eq!(doc.count("bond"), 1);
        assert_eq!(doc.count("and"), 0);
    }

    #[test]
    fn test_tokenize_empty_text() {
        let tokenizer = TextTokenizer::standard().unwrap();
        let doc = tokenizer.tokenize("  ...  ").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_stopped_tokens_are_not_counted() {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["the"]).remove_stopped(false)));
        let tokenizer = TextTokenizer::new(Arc::new(analyzer));

        let doc = tokenizer.tokenize("the ball").unwrap();
        assert_eq!(doc.count("the"), 0);
        assert_eq!(doc.count("ball"), 1);
    }

    #[test]
    fn test_with_category() {
        let doc = Document::default().with_category("sports");
        assert_eq!(doc.category, "sports");
        assert!(doc.is_empty());
    }
}

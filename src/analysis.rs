//! Text analysis for Kopis.
//!
//! Turns raw text into normalized tokens: a tokenizer splits the text, filters
//! normalize the tokens, and an analyzer ties both together. The classifier
//! consumes analyzers through [`crate::document::TextTokenizer`].

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

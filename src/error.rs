//! Error types for the Kopis library.
//!
//! All errors are represented by the [`KopisError`] enum. Caller contract
//! violations ([`KopisError::NotTrained`], [`KopisError::InvalidPriors`]) abort
//! the operation without touching the model; numeric edge cases such as empty
//! categories are never reported as errors.
//!
//! # Examples
//!
//! ```
//! use kopis::error::{KopisError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KopisError::invalid_priors("missing prior for category 'sports'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kopis operations.
#[derive(Error, Debug)]
pub enum KopisError {
    /// Prediction was requested before a knowledge base was trained or loaded.
    #[error("Knowledge base missing: train a classifier or load a model before predicting")]
    NotTrained,

    /// Supplied category priors do not match the observed categories.
    #[error("Invalid priors: {0}")]
    InvalidPriors(String),

    /// The knowledge base holds no categories, so nothing can be predicted.
    #[error("Empty model: the knowledge base has no categories")]
    EmptyModel,

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Model encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

}

/// Result type alias for operations that may fail with KopisError.
pub type Result<T> = std::result::Result<T, KopisError>;

impl KopisError {
    /// Create a new invalid priors error.
    pub fn invalid_priors<S: Into<String>>(msg: S) -> Self {
        KopisError::InvalidPriors(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KopisError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KopisError::InvalidConfig(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        KopisError::Serialization(msg.into())
    }
}

impl From<bincode::Error> for KopisError {
    fn from(err: bincode::Error) -> Self {
        KopisError::Serialization(err.to_string())
    }
}

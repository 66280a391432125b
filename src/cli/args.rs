//! Command line argument parsing for the Kopis CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::persistence::ModelFormat;

/// Kopis - Naive Bayes text classification
#[derive(Parser, Debug, Clone)]
#[command(name = "kopis")]
#[command(about = "Train and run multinomial Naive Bayes text classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KopisArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KopisArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier from a labeled dataset and save the model
    Train(TrainArgs),

    /// Predict the category of a text
    Predict(PredictArgs),

    /// Show the parameters of a trained model
    Inspect(InspectArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Dataset file: JSON object mapping each category to its example texts
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Where to write the trained model
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Prior probabilities file: JSON object mapping each category to a probability
    #[arg(long, value_name = "PRIORS_FILE")]
    pub priors: Option<PathBuf>,

    /// Training configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Chi-square critical value for feature selection (overrides the config file)
    #[arg(long, env = "KOPIS_CRITICAL_VALUE")]
    pub critical_value: Option<f64>,

    /// Model encoding (inferred from the file extension by default)
    #[arg(long)]
    pub model_format: Option<ModelFormatArg>,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Trained model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Show the K best categories with their scores
    #[arg(short, long, value_name = "K")]
    pub top: Option<usize>,

    /// Model encoding (inferred from the file extension by default)
    #[arg(long)]
    pub model_format: Option<ModelFormatArg>,
}

/// Arguments for inspecting a model
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Trained model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Number of most likely features to list per category
    #[arg(long, default_value = "10")]
    pub features: usize,

    /// Model encoding (inferred from the file extension by default)
    #[arg(long)]
    pub model_format: Option<ModelFormatArg>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Model encodings selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormatArg {
    /// JSON
    Json,
    /// bincode
    Binary,
}

impl From<ModelFormatArg> for ModelFormat {
    fn from(arg: ModelFormatArg) -> Self {
        match arg {
            ModelFormatArg::Json => ModelFormat::Json,
            ModelFormatArg::Binary => ModelFormat::Binary,
        }
    }
}

/// Resolve the model format from an explicit flag or the file extension.
pub fn resolve_model_format(arg: Option<ModelFormatArg>, path: &std::path::Path) -> ModelFormat {
    arg.map(ModelFormat::from)
        .unwrap_or_else(|| ModelFormat::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train() {
        let args = KopisArgs::parse_from([
            "kopis",
            "-vv",
            "train",
            "data.json",
            "model.bin",
            "--critical-value",
            "3.84",
        ]);

        assert_eq!(args.verbosity(), 2);
        match args.command {
            Command::Train(train) => {
                assert_eq!(train.dataset, PathBuf::from("data.json"));
                assert_eq!(train.critical_value, Some(3.84));
                assert!(train.priors.is_none());
            }
            _ => panic!("Expected train command"),
        }
    }

    #[test]
    fn test_parse_predict_with_top() {
        let args = KopisArgs::parse_from([
            "kopis", "-q", "-f", "json", "predict", "model.json", "what a goal", "--top", "3",
        ]);

        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Predict(predict) => {
                assert_eq!(predict.text, "what a goal");
                assert_eq!(predict.top, Some(3));
            }
            _ => panic!("Expected predict command"),
        }
    }

    #[test]
    fn test_resolve_model_format() {
        let path = std::path::Path::new("model.json");
        assert_eq!(resolve_model_format(None, path), ModelFormat::Json);
        assert_eq!(
            resolve_model_format(Some(ModelFormatArg::Binary), path),
            ModelFormat::Binary
        );
    }
}

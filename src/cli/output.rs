//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{KopisArgs, OutputFormat};
use crate::error::Result;
use crate::prediction::Prediction;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub documents: usize,
    pub features: usize,
    pub categories: usize,
    pub duration_ms: u64,
}

/// Result structure for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub category: String,
    pub ranking: Option<Vec<Prediction>>,
}

/// Parameters of a trained model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSummary {
    pub documents: usize,
    pub features: usize,
    pub categories: usize,
    pub log_priors: BTreeMap<String, f64>,
    pub top_features: BTreeMap<String, Vec<(String, f64)>>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &KopisArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &KopisArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("PredictionResult") => {
            output_prediction_human(&value)
        }
        _ if std::any::type_name::<T>().contains("ModelSummary") => output_summary_human(&value),
        _ => output_generic_human(&value),
    }
}

/// Output a prediction in human format.
fn output_prediction_human(value: &serde_json::Value) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(category) = obj.get("category").and_then(|c| c.as_str()) {
            println!("{category}");
        }

        if let Some(ranking) = obj.get("ranking").and_then(|r| r.as_array()) {
            println!();
            for (i, prediction) in ranking.iter().enumerate() {
                let category = prediction
                    .get("category")
                    .and_then(|c| c.as_str())
                    .unwrap_or("unknown");
                println!(
                    "{:>3}. {category} ({})",
                    i + 1,
                    format_score(prediction.get("score"))
                );
            }
        }
    }
    Ok(())
}

/// Output model parameters in human format.
fn output_summary_human(value: &serde_json::Value) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Model Summary:");
        println!("══════════════");

        if let Some(n) = obj.get("documents").and_then(|d| d.as_u64()) {
            println!("Training documents: {n}");
        }
        if let Some(d) = obj.get("features").and_then(|f| f.as_u64()) {
            println!("Selected features: {d}");
        }
        if let Some(c) = obj.get("categories").and_then(|c| c.as_u64()) {
            println!("Categories: {c}");
        }

        if let Some(priors) = obj.get("log_priors").and_then(|p| p.as_object()) {
            println!();
            println!("Log priors:");
            println!("───────────");
            for (category, prior) in priors {
                println!("  {category}: {}", format_score(Some(prior)));
            }
        }

        if let Some(top_features) = obj.get("top_features").and_then(|t| t.as_object()) {
            println!();
            println!("Top features:");
            println!("─────────────");
            for (category, features) in top_features {
                println!("{category}:");
                for feature in features.as_array().into_iter().flatten() {
                    if let Some(pair) = feature.as_array()
                        && pair.len() >= 2
                    {
                        let name = pair[0].as_str().unwrap_or("unknown");
                        println!("  {name} ({})", format_score(Some(&pair[1])));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &KopisArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a log score. serde_json turns non-finite floats into null, which
/// for a score only ever means negative infinity.
fn format_score(value: Option<&serde_json::Value>) -> String {
    match value.and_then(|v| v.as_f64()) {
        Some(score) => format!("{score:.4}"),
        None => "-inf".to_string(),
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

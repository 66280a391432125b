//! Command implementations for the Kopis CLI.

use std::collections::BTreeMap;
use std::time::Instant;

use log::info;

use crate::classifier::{NaiveBayes, NaiveBayesConfig};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{KopisError, Result};
use crate::persistence::{
    load_knowledge_base, load_priors, load_training_data, save_knowledge_base,
};
use crate::prediction::top_k;

/// Execute a CLI command.
pub fn execute_command(args: KopisArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Predict(predict_args) => predict_text(predict_args.clone(), &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args.clone(), &args),
    }
}

/// Train a classifier and save its knowledge base.
fn train_model(args: TrainArgs, cli_args: &KopisArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            if cli_args.verbosity() > 1 {
                println!("Loading configuration from: {}", path.display());
            }
            NaiveBayesConfig::from_file(path)?
        }
        None => NaiveBayesConfig::default(),
    };
    if let Some(critical_value) = args.critical_value {
        config = config.with_critical_value(critical_value);
    }

    if cli_args.verbosity() > 1 {
        println!("Loading dataset from: {}", args.dataset.display());
    }
    let dataset = load_training_data(&args.dataset)?;

    let start = Instant::now();
    let mut classifier = NaiveBayes::with_config(config)?;
    match &args.priors {
        Some(path) => {
            let priors = load_priors(path)?;
            classifier.train_with_priors(&dataset, &priors)?;
        }
        None => classifier.train(&dataset)?,
    }
    let duration = start.elapsed();

    let knowledge_base = classifier
        .knowledge_base()
        .ok_or(KopisError::NotTrained)?;
    let format = resolve_model_format(args.model_format, &args.model);
    save_knowledge_base(knowledge_base, &args.model, format)?;
    info!("model written to {}", args.model.display());

    output_result(
        "Training completed successfully",
        &TrainingResult {
            model_path: args.model.to_string_lossy().to_string(),
            documents: knowledge_base.n,
            features: knowledge_base.d,
            categories: knowledge_base.c,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Predict the category of a text with a saved model.
fn predict_text(args: PredictArgs, cli_args: &KopisArgs) -> Result<()> {
    let format = resolve_model_format(args.model_format, &args.model);
    let classifier = NaiveBayes::from_knowledge_base(load_knowledge_base(&args.model, format)?)?;

    output_result(
        "Prediction",
        &classify(&classifier, &args.text, args.top)?,
        cli_args,
    )
}

/// Score a text once and take both the best category and the top `k`
/// ranking from the same scores.
fn classify(classifier: &NaiveBayes, text: &str, top: Option<usize>) -> Result<PredictionResult> {
    let scores = classifier.predict_scores(text)?;
    let mut ranked = top_k(&scores, top.unwrap_or(1).max(1));
    let category = ranked
        .first()
        .map(|prediction| prediction.category.clone())
        .ok_or(KopisError::EmptyModel)?;

    let ranking = top.map(|k| {
        ranked.truncate(k);
        ranked
    });
    Ok(PredictionResult { category, ranking })
}

/// Show the parameters of a saved model.
fn inspect_model(args: InspectArgs, cli_args: &KopisArgs) -> Result<()> {
    let format = resolve_model_format(args.model_format, &args.model);
    let knowledge_base = load_knowledge_base(&args.model, format)?;

    let top_features: BTreeMap<String, Vec<(String, f64)>> = knowledge_base
        .categories()
        .map(|category| {
            (
                category.to_string(),
                knowledge_base.top_features(category, args.features),
            )
        })
        .collect();

    output_result(
        &format!("Model: {}", args.model.display()),
        &ModelSummary {
            documents: knowledge_base.n,
            features: knowledge_base.d,
            categories: knowledge_base.c,
            log_priors: knowledge_base.log_priors.clone(),
            top_features,
        },
        cli_args,
    )
}

//! Reading and writing models, datasets and priors.
//!
//! A model file holds exactly the [`KnowledgeBase`]. The binary format
//! (bincode) reproduces every `f64` bit for bit, infinities included. JSON is
//! human readable but cannot represent the negative infinity stored for a zero
//! prior, so such models are refused instead of being silently corrupted.
//!
//! Writes go to a temporary file in the target directory which is then
//! renamed over the destination, so a crash never leaves a truncated model.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::classifier::KnowledgeBase;
use crate::error::{KopisError, Result};

/// On-disk encoding of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Pretty-printed JSON.
    Json,
    /// Compact bincode encoding.
    Binary,
}

impl ModelFormat {
    /// Infer the format from a file extension: `.json` is JSON, anything
    /// else is binary.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ModelFormat::Json,
            _ => ModelFormat::Binary,
        }
    }
}

/// Save a knowledge base atomically.
pub fn save_knowledge_base<P: AsRef<Path>>(
    knowledge_base: &KnowledgeBase,
    path: P,
    format: ModelFormat,
) -> Result<()> {
    let path = path.as_ref();
    if format == ModelFormat::Json && !knowledge_base.is_finite() {
        return Err(KopisError::serialization(
            "model contains infinite log probabilities (zero priors); use the binary format",
        ));
    }

    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        match format {
            ModelFormat::Json => serde_json::to_writer_pretty(&mut writer, knowledge_base)?,
            ModelFormat::Binary => bincode::serialize_into(&mut writer, knowledge_base)?,
        }
        writer.flush()?;
    }
    temp_file
        .persist(path)
        .map_err(|e| KopisError::Io(e.error))?;

    debug!("saved model to {} ({:?})", path.display(), format);
    Ok(())
}

/// Load a knowledge base.
pub fn load_knowledge_base<P: AsRef<Path>>(path: P, format: ModelFormat) -> Result<KnowledgeBase> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let knowledge_base = match format {
        ModelFormat::Json => serde_json::from_reader(reader)?,
        ModelFormat::Binary => bincode::deserialize_from(reader)?,
    };
    Ok(knowledge_base)
}

/// Load a training dataset from a JSON object mapping each category to its
/// example texts.
pub fn load_training_data<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, Vec<String>>> {
    let content = fs::read_to_string(path)?;
    let dataset: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)?;
    Ok(dataset)
}

/// Load category priors from a JSON object mapping each category to its
/// probability.
pub fn load_priors<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, f64>> {
    let content = fs::read_to_string(path)?;
    let priors: BTreeMap<String, f64> = serde_json::from_str(&content)?;
    Ok(priors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ModelFormat::from_path("model.json"), ModelFormat::Json);
        assert_eq!(ModelFormat::from_path("model.JSON"), ModelFormat::Json);
        assert_eq!(ModelFormat::from_path("model.bin"), ModelFormat::Binary);
        assert_eq!(ModelFormat::from_path("model"), ModelFormat::Binary);
    }

    #[test]
    fn test_json_refuses_infinite_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let knowledge_base = KnowledgeBase {
            n: 1,
            d: 0,
            c: 1,
            log_priors: BTreeMap::from([("a".to_string(), f64::NEG_INFINITY)]),
            log_likelihoods: BTreeMap::new(),
        };

        let err = save_knowledge_base(&knowledge_base, &path, ModelFormat::Json).unwrap_err();
        assert!(matches!(err, KopisError::Serialization(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_training_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        fs::write(&path, r#"{"sports": ["ball goal"], "finance": ["stock", "bond"]}"#).unwrap();

        let dataset = load_training_data(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset["finance"], vec!["stock", "bond"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_knowledge_base("/nonexistent/model.bin", ModelFormat::Binary).unwrap_err();
        assert!(matches!(err, KopisError::Io(_)));
    }
}

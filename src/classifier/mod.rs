//! Classifier adapter: free text in, disease label out.
//!
//! The production classifier is a TF-IDF vectorizer feeding a linear
//! model, both loaded from JSON artifacts at startup and never mutated.
//! Callers depend on the [`TextClassifier`] trait so the orchestration
//! layer does not care which model sits behind it.

pub mod model;
pub mod vectorizer;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use model::{LinearModel, LinearModelSpec};
use vectorizer::{TfidfVectorizer, VectorizerSpec};

/// Errors raised while loading classifier artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Errors raised while classifying a single input.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("Input text is empty")]
    EmptyInput,
    #[error("Classifier failure: {0}")]
    Failed(String),
}

/// Label produced by the classifier. Opaque; used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseLabel(String);

impl DiseaseLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiseaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deterministic text → label mapping.
pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<DiseaseLabel, ClassifyError>;

    /// Number of labels the classifier can produce.
    fn class_count(&self) -> usize;
}

/// TF-IDF vectorizer plus linear model.
#[derive(Debug)]
pub struct LinearTextClassifier {
    vectorizer: TfidfVectorizer,
    model: LinearModel,
}

impl LinearTextClassifier {
    pub fn new(vectorizer: TfidfVectorizer, model: LinearModel) -> Result<Self, ModelError> {
        if vectorizer.n_features() != model.n_features() {
            return Err(ModelError::Invalid(format!(
                "vectorizer produces {} features but model expects {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Load both artifacts from disk.
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self, ModelError> {
        let vectorizer = TfidfVectorizer::from_spec(read_json::<VectorizerSpec>(vectorizer_path)?)?;
        let model = LinearModel::from_spec(read_json::<LinearModelSpec>(model_path)?)?;

        tracing::info!(
            classes = model.classes().len(),
            features = model.n_features(),
            "Classifier loaded"
        );

        Self::new(vectorizer, model)
    }
}

impl TextClassifier for LinearTextClassifier {
    fn classify(&self, text: &str) -> Result<DiseaseLabel, ClassifyError> {
        if text.trim().is_empty() {
            return Err(ClassifyError::EmptyInput);
        }
        let features = self.vectorizer.transform(text);
        Ok(DiseaseLabel::new(self.model.predict(&features)))
    }

    fn class_count(&self) -> usize {
        self.model.classes().len()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

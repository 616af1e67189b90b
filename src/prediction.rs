//! Request orchestration: symptom text → label → reference record.
//!
//! One code path produces a [`PredictionResult`]; the HTTP layer adapts it
//! either into the analysis page or into the JSON API shape.


use serde::Serialize;

use crate::classifier::{ClassifyError, DiseaseLabel, TextClassifier};
use crate::lookup::{DiseaseRecord, DiseaseTable};

/// Shown when no reference record matches the predicted label.
pub const NOT_AVAILABLE: &str = "Not available";
/// Precaution advice shown when no reference record matches.
pub const CONSULT_A_DOCTOR: &str = "Consult a doctor";
/// Shown when a matched record has no value for a field.
pub const FIELD_MISSING: &str = "N/A";

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("No symptoms provided")]
    EmptyQuery,
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifyError),
}

/// Caller-supplied symptom text, guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomQuery(String);

impl SymptomQuery {
    /// Accept text only if something remains after trimming.
    pub fn parse(text: &str) -> Result<Self, PredictError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PredictError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Combined classifier + lookup output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub major: DiseaseLabel,
    /// `None` when the label has no reference record.
    pub record: Option<DiseaseRecord>,
}

impl PredictionResult {
    pub fn minor(&self) -> &str {
        self.field(|r| r.minor_disease.as_deref(), NOT_AVAILABLE)
    }

    pub fn precautions(&self) -> &str {
        self.field(|r| r.precautions.as_deref(), CONSULT_A_DOCTOR)
    }

    pub fn medicines(&self) -> &str {
        self.field(|r| r.medicines.as_deref(), NOT_AVAILABLE)
    }

    fn field<'a>(
        &'a self,
        get: impl Fn(&'a DiseaseRecord) -> Option<&'a str>,
        fallback: &'static str,
    ) -> &'a str {
        match &self.record {
            Some(record) => get(record).unwrap_or(FIELD_MISSING),
            None => fallback,
        }
    }

    /// JSON shape: sentinels become `null`.
    pub fn to_api(&self) -> ApiPrediction {
        let record = self.record.as_ref();
        ApiPrediction {
            predicted_disease: self.major.to_string(),
            minor_disease: record.and_then(|r| r.minor_disease.clone()),
            precautions: record.and_then(|r| r.precautions.clone()),
            medicines: record.and_then(|r| r.medicines.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiPrediction {
    pub predicted_disease: String,
    pub minor_disease: Option<String>,
    pub precautions: Option<String>,
    pub medicines: Option<String>,
}

/// Read-only prediction pipeline shared by every request.
pub struct Predictor {
    classifier: Box<dyn TextClassifier>,
    table: DiseaseTable,
}

impl Predictor {
    pub fn new(classifier: impl TextClassifier + 'static, table: DiseaseTable) -> Self {
        Self {
            classifier: Box::new(classifier),
            table,
        }
    }

    pub fn predict(&self, query: &SymptomQuery) -> Result<PredictionResult, PredictError> {
        let major = self.classifier.classify(query.as_str())?;
        let record = self.table.lookup(&major).cloned();

        if record.is_none() {
            tracing::debug!(label = %major, "No reference record for predicted label");
        }

        Ok(PredictionResult { major, record })
    }

    /// Parse raw text and predict in one step.
    pub fn predict_text(&self, text: &str) -> Result<PredictionResult, PredictError> {
        self.predict(&SymptomQuery::parse(text)?)
    }

    pub fn class_count(&self) -> usize {
        self.classifier.class_count()
    }

    pub fn disease_count(&self) -> usize {
        self.table.len()
    }
}

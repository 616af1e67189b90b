//! Linear classifier over sparse feature vectors.

use serde::Deserialize;

use super::vectorizer::SparseVector;
use super::ModelError;

/// On-disk form of the classifier artifact.
#[derive(Debug, Deserialize)]
pub struct LinearModelSpec {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// One-vs-rest (or binary) linear decision function.
#[derive(Debug)]
pub struct LinearModel {
    classes: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearModel {
    pub fn from_spec(spec: LinearModelSpec) -> Result<Self, ModelError> {
        let LinearModelSpec {
            classes,
            coef,
            intercept,
        } = spec;

        if classes.is_empty() {
            return Err(ModelError::Invalid("model has no classes".into()));
        }

        let binary = classes.len() == 2 && coef.len() == 1;
        if !binary && coef.len() != classes.len() {
            return Err(ModelError::Invalid(format!(
                "{} coefficient rows for {} classes",
                coef.len(),
                classes.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(ModelError::Invalid(format!(
                "{} intercepts for {} coefficient rows",
                intercept.len(),
                coef.len()
            )));
        }

        let n_features = coef[0].len();
        if let Some(row) = coef.iter().position(|r| r.len() != n_features) {
            return Err(ModelError::Invalid(format!(
                "coefficient row {row} has {} features, expected {n_features}",
                coef[row].len()
            )));
        }
        let finite = coef.iter().flatten().chain(&intercept).all(|w| w.is_finite());
        if !finite {
            return Err(ModelError::Invalid("model contains non-finite weights".into()));
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            n_features,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Raw decision scores, one per coefficient row.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| x.iter().map(|&(i, w)| row[i] * w).sum::<f64>() + b)
            .collect()
    }

    /// Highest-scoring class; earlier classes win ties.
    pub fn predict(&self, x: &SparseVector) -> &str {
        let scores = self.decision_function(x);

        if self.classes.len() == 2 && scores.len() == 1 {
            let index = usize::from(scores[0] > 0.0);
            return &self.classes[index];
        }

        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        &self.classes[best]
    }
}

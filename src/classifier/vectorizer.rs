//! TF-IDF text vectorizer.
//!
//! Turns free text into a sparse, normalized feature vector using a fixed
//! vocabulary learned offline. Tokens are runs of two or more word
//! characters; n-grams are built from the token stream after stop-word
//! removal.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::ModelError;

/// Sparse feature vector: `(feature index, weight)` sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of the vectorizer artifact.
#[derive(Debug, Deserialize)]
pub struct VectorizerSpec {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Option<Norm>,
    n_features: usize,
}

/// Runs of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

impl TfidfVectorizer {
    /// Validate an artifact and build the vectorizer.
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self, ModelError> {
        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::Invalid(format!(
                "ngram_range ({min_n}, {max_n}) must satisfy 1 <= min <= max"
            )));
        }
        if spec.vocabulary.is_empty() {
            return Err(ModelError::Invalid("vocabulary is empty".into()));
        }

        let n_features = match &spec.idf {
            Some(idf) => idf.len(),
            None => spec.vocabulary.values().max().map_or(0, |max| max + 1),
        };

        if let Some((term, &index)) = spec.vocabulary.iter().find(|(_, &i)| i >= n_features) {
            return Err(ModelError::Invalid(format!(
                "vocabulary term {term:?} has index {index} outside {n_features} features"
            )));
        }
        if let Some(idf) = &spec.idf {
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::Invalid("idf contains non-finite weights".into()));
            }
        }

        let stop_words = spec
            .stop_words
            .into_iter()
            .map(|w| if spec.lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            lowercase: spec.lowercase,
            ngram_range: spec.ngram_range,
            stop_words,
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
            n_features,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Split text into the n-gram terms the vocabulary is keyed by.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Vectorize text; terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                let idf = self.idf.as_ref().map_or(1.0, |idf| idf[index]);
                (index, tf * idf)
            })
            .collect();

        let magnitude = match self.norm {
            Some(Norm::L2) => vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
            Some(Norm::L1) => vector.iter().map(|(_, w)| w.abs()).sum::<f64>(),
            None => 1.0,
        };
        if magnitude > 0.0 {
            for (_, w) in &mut vector {
                *w /= magnitude;
            }
        }
        vector
    }
}

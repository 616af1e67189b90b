//! Shared state for the HTTP layer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::prediction::Predictor;

/// Context handed to every route. Cloning is cheap; everything inside is
/// read-only after startup.
#[derive(Clone)]
pub struct AppContext {
    pub predictor: Arc<Predictor>,
    pub static_dir: PathBuf,
}

impl AppContext {
    pub fn new(predictor: Predictor, static_dir: PathBuf) -> Self {
        Self {
            predictor: Arc::new(predictor),
            static_dir,
        }
    }
}

/// Form body carrying the free-text symptoms field.
#[derive(Debug, Default, serde::Deserialize)]
pub struct SymptomsForm {
    pub symptoms: Option<String>,
}

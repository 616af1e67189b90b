use std::env;
use std::fmt::Display;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application-level constants
pub const APP_NAME: &str = "Symptom Checker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Artifact locations relative to the application home.
const MODEL_FILE: &str = "app/ml_models/model.json";
const VECTORIZER_FILE: &str = "app/ml_models/vectorizer.json";
const DATASET_FILE: &str = "app/data/imdb_train_with_minor_disease.csv";
const STATIC_DIR: &str = "app/static";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_checker=info,tower_http=warn"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Runtime configuration, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub dataset_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("SYMPTOM_CHECKER_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            host: parse_or("HOST", &lookup, IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or("PORT", &lookup, DEFAULT_PORT)?,
            model_path: path_or("MODEL_PATH", &lookup, &home, MODEL_FILE),
            vectorizer_path: path_or("VECTORIZER_PATH", &lookup, &home, VECTORIZER_FILE),
            dataset_path: path_or("DATASET_PATH", &lookup, &home, DATASET_FILE),
            static_dir: path_or("STATIC_DIR", &lookup, &home, STATIC_DIR),
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: format!("{raw:?}: {e}"),
        }),
        None => {
            tracing::info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn path_or<F>(key: &str, lookup: &F, home: &Path, relative: &str) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(relative))
}

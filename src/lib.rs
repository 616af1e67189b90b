pub mod api;
pub mod classifier;
pub mod config;
pub mod lookup;
pub mod prediction;

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use api::{start_server_on, AppContext, ServerError};
use classifier::{LinearTextClassifier, ModelError};
use config::{Config, ConfigError};
use lookup::{DatasetError, DiseaseTable};
use prediction::Predictor;

/// Anything that keeps the process from serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Model load failed: {0}")]
    Model(#[from] ModelError),
    #[error("Dataset load failed: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Server failed to start: {0}")]
    Server(#[from] ServerError),
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load every startup artifact and assemble the shared request context.
pub fn load_context(config: &Config) -> Result<AppContext, StartupError> {
    tracing::info!(
        model = %config.model_path.display(),
        vectorizer = %config.vectorizer_path.display(),
        dataset = %config.dataset_path.display(),
        "Loading artifacts"
    );

    let classifier = LinearTextClassifier::load(&config.model_path, &config.vectorizer_path)?;
    let table = DiseaseTable::load(&config.dataset_path)?;

    if !config.static_dir.is_dir() {
        tracing::warn!(dir = %config.static_dir.display(), "Static directory not found; /static will 404");
    }

    let predictor = Predictor::new(classifier, table);
    Ok(AppContext::new(predictor, config.static_dir.clone()))
}

/// Start the service and block until Ctrl+C or SIGTERM.
pub async fn run() -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = Config::from_env()?;
    let ctx = load_context(&settings)?;

    let addr = SocketAddr::new(settings.host, settings.port);
    let mut server = start_server_on(ctx, addr).await?;

    shutdown_signal().await;
    server.shutdown();
    server.wait().await;

    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config_in(dir: &Path) -> Config {
        let home = dir.to_string_lossy().to_string();
        Config::from_lookup(move |key| (key == "SYMPTOM_CHECKER_HOME").then(|| home.clone()))
            .unwrap()
    }

    fn write_all_artifacts(dir: &Path) {
        let models = dir.join("app/ml_models");
        let data = dir.join("app/data");
        std::fs::create_dir_all(&models).unwrap();
        std::fs::create_dir_all(&data).unwrap();
        classifier::tests::write_artifacts(&models);
        std::fs::write(
            data.join("imdb_train_with_minor_disease.csv"),
            lookup::tests::DATASET_CSV,
        )
        .unwrap();
    }

    #[test]
    fn load_context_from_default_layout() {
        let tmp = tempfile::tempdir().unwrap();
        write_all_artifacts(tmp.path());

        let ctx = load_context(&config_in(tmp.path())).unwrap();
        assert_eq!(ctx.predictor.class_count(), 3);
        assert_eq!(ctx.predictor.disease_count(), 2);
        let result = ctx.predictor.predict_text("fever and cough").unwrap();
        assert_eq!(result.major.as_str(), "Flu");
    }

    #[test]
    fn missing_model_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_all_artifacts(tmp.path());
        std::fs::remove_file(tmp.path().join("app/ml_models/model.json")).unwrap();

        let err = load_context(&config_in(tmp.path())).err().unwrap();
        assert!(matches!(err, StartupError::Model(_)));
    }

    #[test]
    fn missing_dataset_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_all_artifacts(tmp.path());
        std::fs::remove_file(tmp.path().join("app/data/imdb_train_with_minor_disease.csv")).unwrap();

        let err = load_context(&config_in(tmp.path())).err().unwrap();
        assert!(matches!(err, StartupError::Dataset(_)));
    }
}

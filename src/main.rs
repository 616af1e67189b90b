use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    symptom_checker::init_tracing();

    match symptom_checker::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

//! Prediction endpoints.
//!
//! - `POST /analysis.html` and `POST /predict` — analysis page with result
//! - `POST /api/predict` — JSON result
//!
//! A body that is not a urlencoded form is treated like a missing
//! `symptoms` field.

use axum::extract::State;
use axum::response::Html;
use axum::{Form, Json};

use crate::api::error::ApiError;
use crate::api::pages::{self, AnalysisView, ANALYSIS_FAILED, ENTER_SYMPTOMS};
use crate::api::types::{AppContext, SymptomsForm};
use crate::prediction::{ApiPrediction, PredictError};

fn symptoms_of(form: Option<Form<SymptomsForm>>) -> String {
    form.and_then(|Form(f)| f.symptoms).unwrap_or_default()
}

/// Render the analysis page for a submitted form. Never fails: empty input
/// and pipeline errors produce a page without a result.
pub async fn page(
    State(ctx): State<AppContext>,
    form: Option<Form<SymptomsForm>>,
) -> Html<String> {
    let symptoms = symptoms_of(form);

    let outcome = ctx.predictor.predict_text(&symptoms);
    let (result, notice) = match &outcome {
        Ok(result) => {
            tracing::info!(label = %result.major, matched = result.record.is_some(), "Prediction served");
            (Some(result), None)
        }
        Err(PredictError::EmptyQuery) => (None, Some(ENTER_SYMPTOMS)),
        Err(e) => {
            tracing::error!(error = %e, "Prediction failed");
            (None, Some(ANALYSIS_FAILED))
        }
    };

    Html(pages::render_analysis(&AnalysisView {
        symptoms: &symptoms,
        result,
        notice,
    }))
}

/// `POST /api/predict` — JSON prediction.
pub async fn api(
    State(ctx): State<AppContext>,
    form: Option<Form<SymptomsForm>>,
) -> Result<Json<ApiPrediction>, ApiError> {
    let symptoms = symptoms_of(form);
    let result = ctx.predictor.predict_text(&symptoms)?;

    tracing::info!(label = %result.major, matched = result.record.is_some(), "API prediction served");

    Ok(Json(result.to_api()))
}

//! Static pages.

use axum::response::Html;

use crate::api::pages::{self, AnalysisView};

/// `GET /`
pub async fn home() -> Html<String> {
    Html(pages::render_home())
}

/// `GET /signin.html`
pub async fn signin() -> Html<String> {
    Html(pages::render_signin())
}

/// `GET /signup.html`
pub async fn signup() -> Html<String> {
    Html(pages::render_signup())
}

/// `GET /reminder.html`
pub async fn reminder() -> Html<String> {
    Html(pages::render_reminder())
}

/// `GET /analysis.html` — empty form.
pub async fn analysis() -> Html<String> {
    Html(pages::render_analysis(&AnalysisView::default()))
}

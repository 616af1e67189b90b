//! Placeholder authentication endpoints.
//!
//! `POST /login` accepts a single demo credential pair; there is no user
//! store. `POST /register` accepts the sign-up form and stores nothing.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use subtle::ConstantTimeEq;

const DEMO_EMAIL: &str = "test@test.com";
const DEMO_PASSWORD: &str = "123";

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

fn credentials_match(email: &str, password: &str) -> bool {
    let email_ok = email.as_bytes().ct_eq(DEMO_EMAIL.as_bytes());
    let password_ok = password.as_bytes().ct_eq(DEMO_PASSWORD.as_bytes());
    (email_ok & password_ok).into()
}

/// `POST /login` — redirect to the analysis page, or 401 plain text.
pub async fn login(form: Option<Form<LoginForm>>) -> Response {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let email = form.email.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    if credentials_match(&email, &password) {
        tracing::info!("Login succeeded");
        Redirect::to("/analysis.html").into_response()
    } else {
        tracing::warn!("Login rejected");
        (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
    }
}

/// `POST /register` — nothing is persisted; back to sign-in.
pub async fn register(form: Option<Form<RegisterForm>>) -> Redirect {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let complete = form.name.is_some() && form.email.is_some() && form.password.is_some();
    tracing::info!(complete, "Registration received, not persisted");
    Redirect::to("/signin.html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_demo_pair_matches() {
        assert!(credentials_match("test@test.com", "123"));
        assert!(!credentials_match("test@test.com", "1234"));
        assert!(!credentials_match("other@test.com", "123"));
        assert!(!credentials_match("", ""));
    }
}

//! Application router.
//!
//! Pages live at the root, the JSON API is nested under `/api/`, and
//! static assets are served from the configured directory under
//! `/static/`. Every route runs through the access log.

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::AppContext;

/// Build the full application router.
pub fn app_router(ctx: AppContext) -> Router {
    let api = Router::new()
        .route("/predict", post(endpoints::predict::api))
        .route("/health", get(endpoints::health::check))
        .fallback(endpoints::api_not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let static_files = ServeDir::new(&ctx.static_dir);

    Router::new()
        .route("/", get(endpoints::pages::home))
        .route("/signin.html", get(endpoints::pages::signin))
        .route("/signup.html", get(endpoints::pages::signup))
        .route("/reminder.html", get(endpoints::pages::reminder))
        .route(
            "/analysis.html",
            get(endpoints::pages::analysis).post(endpoints::predict::page),
        )
        .route("/predict", post(endpoints::predict::page))
        .route("/login", post(endpoints::auth::login))
        .route("/register", post(endpoints::auth::register))
        .nest("/api", api)
        .nest_service("/static", static_files)
        .layer(axum::middleware::from_fn(middleware::access::log_access))
        .with_state(ctx)
}

//! HTTP routes of the demo server

use axum::extract::{Path, Request};
use axum::routing::get;
use axum::Router;
use polyglot_axum::{localize, localize_config, I18n, I18nLayer, LocalizeRejection};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(i18n: I18nLayer) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/{name}", get(welcome_with_name))
        .layer(i18n)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

async fn welcome(req: Request) -> Result<String, LocalizeRejection> {
    let (parts, _) = req.into_parts();
    Ok(localize(&parts, "welcome")?)
}

async fn welcome_with_name(Path(name): Path<String>, i18n: I18n) -> String {
    i18n.must_localize(localize_config!("welcomeWithName", "name" => name))
}

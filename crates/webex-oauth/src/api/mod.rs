//! HTTP surface of the integration

pub mod routes;

use crate::{config::INDEX_PATH, server::AppState};
use axum::{extract::Request, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, info_span, Span};

/// Build the router: landing page, provider callback, optional static files
pub fn router(state: AppState) -> Router {
    let callback_path = state.config.callback_path();
    info!(%callback_path, "Registering OAuth callback route");

    let mut router = Router::new()
        .route("/", get(routes::index::root))
        .route(INDEX_PATH, get(routes::index::index))
        .route(&callback_path, get(routes::callback::oauth_callback));

    if let Some(dir) = &state.config.server.static_dir {
        info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Request span without the query string, which carries the one-time `code`
fn request_span(request: &Request) -> Span {
    info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

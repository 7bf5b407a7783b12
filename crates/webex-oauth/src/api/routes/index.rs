//! Landing page handlers

use crate::{config::INDEX_PATH, pages, server::AppState};
use axum::{
    extract::State,
    response::{Html, Redirect},
};

/// `GET /`
pub async fn root() -> Redirect {
    Redirect::to(INDEX_PATH)
}

/// `GET /index.html`, the page holding the authorization link
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::index_page(&state.authorize_url))
}

//! Provider redirect handler
//!
//! One request walks the whole flow: classify the callback, exchange the
//! code, onboard the user. The first failure ends it with a feedback page.
//! The response is always a 200 HTML document.

use crate::{
    error::FlowError,
    oauth::{callback, CallbackRequest},
    pages,
    server::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
};
use tracing::{info, warn};

pub async fn oauth_callback(
    State(state): State<AppState>,
    query: Result<Query<CallbackRequest>, QueryRejection>,
) -> Html<String> {
    // Unparseable query strings are reported like missing parameters
    let request = match query {
        Ok(Query(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "Could not parse callback query");
            CallbackRequest::default()
        }
    };

    let flow = complete_authorization(&state, &request);
    let result = match state.config.server.callback_deadline() {
        Some(deadline) => tokio::time::timeout(deadline, flow)
            .await
            .unwrap_or(Err(FlowError::CallbackDeadlineElapsed)),
        None => flow.await,
    };

    match result {
        Ok(document) => {
            info!("Authorization complete, serving the space widget");
            Html(document)
        }
        Err(error) => {
            warn!(code = error.error_code(), %error, "Authorization flow stopped");
            Html(pages::feedback_page(&error.feedback()))
        }
    }
}

async fn complete_authorization(
    state: &AppState,
    request: &CallbackRequest,
) -> Result<String, FlowError> {
    let code = callback::validate(request, &state.config.oauth.state).into_result()?;
    let tokens = state.exchanger.exchange(&code).await.into_result()?;
    state.post_auth.run(&tokens.access_token).await.into_result()
}

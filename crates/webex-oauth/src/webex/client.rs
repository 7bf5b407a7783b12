//! reqwest-backed [`SpacesApi`]

use super::{ApiFailure, Membership, Person, SpacesApi};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use tracing::debug;
use webex_oauth_common::Secret;

/// Error body returned by the Webex API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: Option<String>,
    tracking_id: Option<String>,
}

/// HTTP client for the Webex REST API
#[derive(Debug, Clone)]
pub struct WebexClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebexClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request, turning transport errors and non-2xx statuses into failures
    async fn execute(
        &self,
        method: &Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiFailure> {
        let response = request.send().await.map_err(|e| {
            ApiFailure::transport(format!("could not reach {url} for a {method} request: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(method, url, response).await);
        }

        Ok(response)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiFailure> {
        let response = self.execute(&method, &url, request).await?;

        response.json().await.map_err(|e| {
            ApiFailure::transport(format!(
                "unexpected response to a {method} request to {url}: {e}"
            ))
        })
    }

    /// Turn a non-2xx response into a failure carrying its status
    async fn error_from_response(method: &Method, url: &str, response: Response) -> ApiFailure {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let detail = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                message: Some(message),
                tracking_id,
            }) => match tracking_id {
                Some(id) => format!("{message} (trackingId: {id})"),
                None => message,
            },
            _ if !text.trim().is_empty() => text,
            _ => status.canonical_reason().unwrap_or("no details").to_string(),
        };

        ApiFailure::http(
            status.as_u16(),
            format!(
                "received error {} for a {method} request to {url}: {detail}",
                status.as_u16()
            ),
        )
    }
}

#[async_trait]
impl SpacesApi for WebexClient {
    async fn person_me(&self, access_token: &Secret) -> Result<Person, ApiFailure> {
        let url = self.url("/people/me");
        debug!(%url, "Looking up the authorized person");

        let request = self.http.get(&url).bearer_auth(access_token.expose());
        self.send(Method::GET, url, request).await
    }

    async fn add_membership(
        &self,
        bot_token: &Secret,
        space_id: &str,
        email: &str,
    ) -> Result<Option<Membership>, ApiFailure> {
        let url = self.url("/memberships");
        debug!(%url, space_id, "Adding membership");

        let request = self
            .http
            .post(&url)
            .bearer_auth(bot_token.expose())
            .json(&json!({
                "roomId": space_id,
                "personEmail": email,
                "isModerator": false,
            }));
        let response = self.execute(&Method::POST, &url, request).await?;

        // Any 2xx means the member was added, whatever the body holds
        let body = response.bytes().await.unwrap_or_default();
        Ok(serde_json::from_slice(&body).ok())
    }
}

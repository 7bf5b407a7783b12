//! Authorization code exchange against the provider token endpoint

use crate::{config::Config, error::FlowError};
use reqwest::{header::ACCEPT, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};
use webex_oauth_common::Secret;

/// Tokens issued by the provider.
///
/// Access tokens are valid for 14 days and refresh tokens for 90 days on
/// Webex; both are kept as [`Secret`] so they never reach the logs.
#[derive(Debug, Clone)]
pub struct TokenResponse {
    pub access_token: Secret,
    /// Seconds until the access token expires
    pub expires_in: u64,
    pub refresh_token: Secret,
    /// Seconds until the refresh token expires
    pub refresh_token_expires_in: u64,
}

/// Token endpoint payload as sent on the wire
#[derive(Deserialize)]
struct RawTokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    refresh_token_expires_in: Option<u64>,
}

/// Error body of a rejected exchange
#[derive(Deserialize)]
struct ProviderErrorBody {
    message: Option<String>,
}

impl TokenResponse {
    /// Parse a 200 response body. Every field must be present and non-empty
    /// (non-zero for durations); anything less is rejected as a whole.
    pub fn from_payload(body: &[u8]) -> Option<Self> {
        let raw: RawTokenResponse = serde_json::from_slice(body).ok()?;

        let access_token = raw.access_token.filter(|t| !t.is_empty())?;
        let expires_in = raw.expires_in.filter(|s| *s > 0)?;
        let refresh_token = raw.refresh_token.filter(|t| !t.is_empty())?;
        let refresh_token_expires_in = raw.refresh_token_expires_in.filter(|s| *s > 0)?;

        Some(Self {
            access_token: Secret::new(access_token),
            expires_in,
            refresh_token: Secret::new(refresh_token),
            refresh_token_expires_in,
        })
    }
}

/// Result of one exchange attempt
#[derive(Debug, Clone)]
pub enum ExchangeOutcome {
    /// The token endpoint could not be reached or the response not read
    TransportError,
    /// A response other than 200. `message` carries the provider's
    /// explanation for 400 responses when the body provides one.
    HttpError { status: u16, message: Option<String> },
    /// 200 with a body lacking any of the four token fields
    MalformedPayload,
    Success(TokenResponse),
}

impl ExchangeOutcome {
    /// Classify a received response
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        if status != StatusCode::OK {
            let message = if status == StatusCode::BAD_REQUEST {
                serde_json::from_slice::<ProviderErrorBody>(body)
                    .ok()
                    .and_then(|b| b.message)
                    .filter(|m| !m.is_empty())
            } else {
                None
            };

            return Self::HttpError {
                status: status.as_u16(),
                message,
            };
        }

        match TokenResponse::from_payload(body) {
            Some(tokens) => Self::Success(tokens),
            None => Self::MalformedPayload,
        }
    }

    pub fn into_result(self) -> Result<TokenResponse, FlowError> {
        match self {
            Self::Success(tokens) => Ok(tokens),
            Self::TransportError => Err(FlowError::TokenTransportError),
            Self::HttpError { status, message } => Err(FlowError::TokenHttpError { status, message }),
            Self::MalformedPayload => Err(FlowError::TokenMalformedPayload),
        }
    }
}

/// Exchanges authorization codes for tokens. One attempt per code, never retried.
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    http: reqwest::Client,
    token_endpoint: String,
    client_id: String,
    client_secret: Secret,
    redirect_uri: String,
}

impl TokenExchanger {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            token_endpoint: config.oauth.token_endpoint.clone(),
            client_id: config.oauth.client_id.clone(),
            client_secret: config.oauth.client_secret.clone(),
            redirect_uri: config.redirect_uri(),
        }
    }

    /// POST the code to the token endpoint and classify what comes back
    pub async fn exchange(&self, code: &str) -> ExchangeOutcome {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        debug!(endpoint = %self.token_endpoint, "Exchanging authorization code");

        let response = match self
            .http
            .post(&self.token_endpoint)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Could not reach the token endpoint");
                return ExchangeOutcome::TransportError;
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%status, error = %e, "Could not read the token endpoint response");
                return ExchangeOutcome::TransportError;
            }
        };

        let outcome = ExchangeOutcome::from_response(status, &body);
        match &outcome {
            ExchangeOutcome::Success(tokens) => info!(
                expires_in = tokens.expires_in,
                refresh_token_expires_in = tokens.refresh_token_expires_in,
                "Access token issued"
            ),
            ExchangeOutcome::HttpError { status, .. } => {
                warn!(status, "Access token not issued")
            }
            ExchangeOutcome::MalformedPayload => {
                warn!("Token endpoint answered 200 without the expected token fields")
            }
            ExchangeOutcome::TransportError => {}
        }

        outcome
    }
}

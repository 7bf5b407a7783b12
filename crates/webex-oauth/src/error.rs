//! Error types for the Webex OAuth integration

use crate::pages::Feedback;
use thiserror::Error;

const COULD_NOT_COMPLETE: &str = "OAuth Integration could not complete";
const SPACES: &str = "OAuth Integration Spaces";
const RETRY: &str = "Sorry, could not retrieve your access token. Try again...";

/// Startup and lifecycle errors. These abort the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] webex_oauth_common::ConfigurationError),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Every way one authorization attempt can end short of the widget.
///
/// Errors are detected, logged and rendered as a feedback page by the
/// callback handler; none of them leaves the request or is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("user declined the authorization request")]
    ProviderDeclined,

    #[error("provider rejected the requested scope")]
    ProviderInvalidScope,

    #[error("provider reported a server error")]
    ProviderServerError,

    #[error("provider reported an unhandled error: {0}")]
    ProviderUnknownError(String),

    #[error("callback is missing the code or state parameter")]
    MissingCallbackParameters,

    #[error("callback state does not match the configured state")]
    StateMismatch,

    #[error("token endpoint unreachable")]
    TokenTransportError,

    #[error("token endpoint answered with status {status}")]
    TokenHttpError { status: u16, message: Option<String> },

    #[error("token endpoint returned an incomplete payload")]
    TokenMalformedPayload,

    #[error("person lookup failed: {0}")]
    IdentityLookupFailed(String),

    #[error("membership add failed: {0}")]
    MembershipAddFailed(String),

    #[error("callback handling exceeded its deadline")]
    CallbackDeadlineElapsed,
}

impl FlowError {
    /// Stable code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderDeclined => "PROVIDER_DECLINED",
            Self::ProviderInvalidScope => "PROVIDER_INVALID_SCOPE",
            Self::ProviderServerError => "PROVIDER_SERVER_ERROR",
            Self::ProviderUnknownError(_) => "PROVIDER_UNKNOWN_ERROR",
            Self::MissingCallbackParameters => "MISSING_CALLBACK_PARAMETERS",
            Self::StateMismatch => "STATE_MISMATCH",
            Self::TokenTransportError => "TOKEN_TRANSPORT_ERROR",
            Self::TokenHttpError { .. } => "TOKEN_HTTP_ERROR",
            Self::TokenMalformedPayload => "TOKEN_MALFORMED_PAYLOAD",
            Self::IdentityLookupFailed(_) => "IDENTITY_LOOKUP_FAILED",
            Self::MembershipAddFailed(_) => "MEMBERSHIP_ADD_FAILED",
            Self::CallbackDeadlineElapsed => "CALLBACK_DEADLINE_ELAPSED",
        }
    }

    /// What the user sees for this error
    pub fn feedback(&self) -> Feedback {
        match self {
            Self::ProviderDeclined => Feedback::new(COULD_NOT_COMPLETE, "Got your NO, ciao."),
            Self::ProviderInvalidScope => Feedback::new(
                COULD_NOT_COMPLETE,
                "The application is requesting an invalid scope, Bye bye.",
            ),
            Self::ProviderServerError => Feedback::new(
                COULD_NOT_COMPLETE,
                "Webex sent a Server Error, Auf Wiedersehen.",
            ),
            Self::ProviderUnknownError(_) => {
                Feedback::new(COULD_NOT_COMPLETE, "Error case not implemented, au revoir.")
            }
            Self::MissingCallbackParameters => Feedback::new(
                COULD_NOT_COMPLETE,
                "Unexpected query parameters, ignoring...",
            ),
            Self::StateMismatch => Feedback::new(COULD_NOT_COMPLETE, "Wrong secret, aborting..."),
            Self::TokenTransportError | Self::TokenMalformedPayload => {
                Feedback::new(COULD_NOT_COMPLETE, RETRY)
            }
            Self::TokenHttpError { status: 400, message } => {
                Feedback::new(COULD_NOT_COMPLETE, "Bad request.")
                    .with_detail(message.as_deref().unwrap_or(RETRY))
            }
            Self::TokenHttpError { status: 401, .. } => Feedback::new(
                COULD_NOT_COMPLETE,
                "OAuth authentication error. Ask the service contact to check the secret.",
            ),
            Self::TokenHttpError { .. } => Feedback::new(COULD_NOT_COMPLETE, RETRY),
            Self::IdentityLookupFailed(message) => {
                Feedback::new(SPACES, "Could not retrieve your Person details")
                    .with_detail(format!("Error: {message}"))
            }
            Self::MembershipAddFailed(message) => {
                Feedback::new(SPACES, "Could not add you to the Demo Space")
                    .with_detail(format!("Error: {message}"))
            }
            Self::CallbackDeadlineElapsed => Feedback::new(
                COULD_NOT_COMPLETE,
                "Sorry, the integration took too long to respond. Try again...",
            ),
        }
    }
}

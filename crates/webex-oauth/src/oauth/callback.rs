//! Classification of the provider redirect back to the integration

use crate::error::FlowError;
use serde::Deserialize;

/// Query parameters of the redirect-back request.
///
/// Parameters other than these three (e.g. `error_description`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackRequest {
    pub error: Option<String>,
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Result of inspecting one callback request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The user refused to grant access (`access_denied`)
    Declined,
    /// The integration asked for a scope the provider does not know (`invalid_scope`)
    InvalidScope,
    /// The provider failed on its side (`server_error`)
    ProviderServerError,
    /// Any other provider error code, kept verbatim
    UnknownProviderError(String),
    /// `code` or `state` absent
    MissingParameters,
    /// `state` differs from the configured value
    StateMismatch,
    /// Authorization code ready for exchange
    Valid(String),
}

impl CallbackOutcome {
    /// Split into the authorization code or the error to report
    pub fn into_result(self) -> Result<String, FlowError> {
        match self {
            Self::Valid(code) => Ok(code),
            Self::Declined => Err(FlowError::ProviderDeclined),
            Self::InvalidScope => Err(FlowError::ProviderInvalidScope),
            Self::ProviderServerError => Err(FlowError::ProviderServerError),
            Self::UnknownProviderError(raw) => Err(FlowError::ProviderUnknownError(raw)),
            Self::MissingParameters => Err(FlowError::MissingCallbackParameters),
            Self::StateMismatch => Err(FlowError::StateMismatch),
        }
    }
}

/// Classify a callback. First match wins: a provider `error` takes
/// precedence over missing parameters, which take precedence over the
/// state comparison.
pub fn validate(request: &CallbackRequest, expected_state: &str) -> CallbackOutcome {
    if let Some(error) = present(&request.error) {
        return match error {
            "access_denied" => CallbackOutcome::Declined,
            "invalid_scope" => CallbackOutcome::InvalidScope,
            "server_error" => CallbackOutcome::ProviderServerError,
            other => CallbackOutcome::UnknownProviderError(other.to_string()),
        };
    }

    let (Some(code), Some(state)) = (present(&request.code), present(&request.state)) else {
        return CallbackOutcome::MissingParameters;
    };

    // Exact, case-sensitive comparison
    if state != expected_state {
        return CallbackOutcome::StateMismatch;
    }

    CallbackOutcome::Valid(code.to_string())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

//! OAuth 2.0 authorization code flow against the Webex identity provider
//!
//! Three stages, each producing a tagged outcome consumed by the next:
//! - [`authorize_url`] builds the link that starts the flow
//! - [`callback::validate`] classifies the redirect back from the provider
//! - [`token::TokenExchanger`] trades the authorization code for tokens

pub mod callback;
pub mod token;

pub use callback::{CallbackOutcome, CallbackRequest};
pub use token::{ExchangeOutcome, TokenExchanger, TokenResponse};

use crate::config::Config;

/// Build the provider authorization URL the user is sent to.
///
/// Query values are percent-encoded the way browsers encode URI components,
/// so scope separators become `%20` rather than `+`.
pub fn authorize_url(config: &Config) -> String {
    format!(
        "{}?client_id={}&response_type=code&redirect_uri={}&scope={}&state={}",
        config.oauth.authorize_endpoint,
        urlencoding::encode(&config.oauth.client_id),
        urlencoding::encode(&config.redirect_uri()),
        urlencoding::encode(&config.oauth.scope_string()),
        urlencoding::encode(&config.oauth.state),
    )
}

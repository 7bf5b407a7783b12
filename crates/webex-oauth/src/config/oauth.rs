//! OAuth client registration

use serde::{Deserialize, Serialize};
use webex_oauth_common::Secret;

pub const DEFAULT_AUTHORIZE_ENDPOINT: &str = "https://webexapis.com/v1/authorize";
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://webexapis.com/v1/access_token";
pub const DEFAULT_STATE: &str = "CiscoDevNet";
pub const DEFAULT_SCOPE: &str = "spark:all";

/// Values of the integration registered with the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Integration client ID
    pub client_id: String,

    /// Integration client secret
    pub client_secret: Secret,

    /// Where the provider redirects after authorization.
    /// Derived from the server port when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,

    /// Value round-tripped through the authorization redirect and compared on callback
    pub state: String,

    /// Requested scopes, sent space separated
    pub scopes: Vec<String>,

    /// Provider authorization endpoint
    pub authorize_endpoint: String,

    /// Provider token endpoint
    pub token_endpoint: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: Secret::default(),
            redirect_uri: None,
            state: DEFAULT_STATE.to_string(),
            scopes: vec![DEFAULT_SCOPE.to_string()],
            authorize_endpoint: DEFAULT_AUTHORIZE_ENDPOINT.to_string(),
            token_endpoint: DEFAULT_TOKEN_ENDPOINT.to_string(),
        }
    }
}

impl OAuthConfig {
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

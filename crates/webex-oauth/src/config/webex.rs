//! Webex API access used after authorization

use serde::{Deserialize, Serialize};
use std::time::Duration;
use webex_oauth_common::Secret;

pub const DEFAULT_API_BASE_URL: &str = "https://webexapis.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebexConfig {
    /// Base URL of the People and Memberships APIs
    pub api_base_url: String,

    /// Token of the bot that moderates the demo space
    pub bot_token: Secret,

    /// Space the authorized user is added to
    pub space_id: String,

    /// Per-request timeout in seconds for every outbound call. Unset means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_timeout_secs: Option<u64>,
}

impl Default for WebexConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bot_token: Secret::default(),
            space_id: String::new(),
            outbound_timeout_secs: None,
        }
    }
}

impl WebexConfig {
    pub fn outbound_timeout(&self) -> Option<Duration> {
        self.outbound_timeout_secs.map(Duration::from_secs)
    }
}

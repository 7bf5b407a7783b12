//! HTTP listener configuration

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// Listening port (also used to derive the default redirect URI)
    pub port: u16,

    /// Path of the OAuth callback route; defaults to the redirect URI's path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_path: Option<String>,

    /// Directory served for any path the integration does not route itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,

    /// Upper bound in seconds for handling one callback end to end. Unset means no deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_deadline_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            callback_path: None,
            static_dir: None,
            callback_deadline_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn callback_deadline(&self) -> Option<Duration> {
        self.callback_deadline_secs.map(Duration::from_secs)
    }
}

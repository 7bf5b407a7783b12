//! Configuration module for the Webex OAuth integration
//!
//! Sources are layered, later ones winning:
//! 1. Built-in defaults
//! 2. TOML file (`--config` or `webex-oauth.toml`)
//! 3. The plain environment names used by the integration's deployment
//!    scripts (`CLIENT_ID`, `CLIENT_SECRET`, `PORT`, `REDIRECT_URI`, `STATE`,
//!    `BOT_TOKEN`, `SPACE_ID`)
//! 4. `WEBEX_OAUTH_` prefixed variables, `__` separating sections
//!    (e.g. `WEBEX_OAUTH_SERVER__PORT=9090`)

mod oauth;
mod server;
mod webex;

pub use oauth::{
    OAuthConfig, DEFAULT_AUTHORIZE_ENDPOINT, DEFAULT_SCOPE, DEFAULT_STATE, DEFAULT_TOKEN_ENDPOINT,
};
pub use server::ServerConfig;
pub use webex::{WebexConfig, DEFAULT_API_BASE_URL};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;
use webex_oauth_common::{ConfigLoader, ConfigurationError as ConfigError};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "webex-oauth.toml";

/// Prefix of the structured environment overrides
pub const ENV_PREFIX: &str = "WEBEX_OAUTH_";

/// Path of the page that starts the flow
pub const INDEX_PATH: &str = "/index.html";

/// Plain environment names holding opaque strings, and their nested keys
const LEGACY_STRING_ENV: &[(&str, &str)] = &[
    ("CLIENT_ID", "oauth.client_id"),
    ("CLIENT_SECRET", "oauth.client_secret"),
    ("REDIRECT_URI", "oauth.redirect_uri"),
    ("STATE", "oauth.state"),
    ("BOT_TOKEN", "webex.bot_token"),
    ("SPACE_ID", "webex.space_id"),
];

/// Plain environment name of the listening port
const LEGACY_PORT_ENV: &str = "PORT";

/// Main configuration structure for the integration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Listener configuration
    pub server: ServerConfig,

    /// OAuth client registration
    pub oauth: OAuthConfig,

    /// Webex API access for the post-authorization step
    pub webex: WebexConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => <Config as ConfigLoader<Config>>::load_from_file(&path),
            None => <Config as ConfigLoader<Config>>::load(None),
        }
    }

    /// Extract from an arbitrary figment, for callers composing their own sources
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigError> {
        let config = Self::default();
        toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Redirect URI sent to the provider, derived from the port when not configured
    pub fn redirect_uri(&self) -> String {
        match &self.oauth.redirect_uri {
            Some(uri) if !uri.trim().is_empty() => uri.clone(),
            _ => format!("http://localhost:{}/oauth", self.server.port),
        }
    }

    /// Route that receives the provider redirect
    pub fn callback_path(&self) -> String {
        if let Some(path) = &self.server.callback_path {
            return path.clone();
        }

        match Url::parse(&self.redirect_uri()) {
            Ok(url) if url.path() != "/" => url.path().to_string(),
            _ => "/oauth".to_string(),
        }
    }

    /// Refuse configurations the flow cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.oauth.client_id.trim().is_empty() {
            return Err(ConfigError::missing("oauth.client_id (CLIENT_ID)"));
        }
        if self.oauth.client_secret.is_empty() {
            return Err(ConfigError::missing("oauth.client_secret (CLIENT_SECRET)"));
        }
        if self.webex.bot_token.is_empty() {
            return Err(ConfigError::missing("webex.bot_token (BOT_TOKEN)"));
        }
        if self.webex.space_id.trim().is_empty() {
            return Err(ConfigError::missing("webex.space_id (SPACE_ID)"));
        }
        if self.oauth.state.is_empty() {
            return Err(ConfigError::missing("oauth.state (STATE)"));
        }
        if self.oauth.scopes.iter().all(|s| s.trim().is_empty()) {
            return Err(ConfigError::missing("oauth.scopes"));
        }

        check_url("oauth.redirect_uri", &self.redirect_uri())?;
        check_url("oauth.authorize_endpoint", &self.oauth.authorize_endpoint)?;
        check_url("oauth.token_endpoint", &self.oauth.token_endpoint)?;
        check_url("webex.api_base_url", &self.webex.api_base_url)?;

        let callback_path = self.callback_path();
        if !callback_path.starts_with('/') {
            return Err(ConfigError::invalid(
                "server.callback_path",
                "must start with '/'",
            ));
        }
        if callback_path == "/" || callback_path == INDEX_PATH {
            return Err(ConfigError::invalid(
                "server.callback_path",
                format!("{callback_path} is already served"),
            ));
        }

        Ok(())
    }

    fn layered(file: Figment) -> Figment {
        let mut figment = file.merge(
            Env::raw()
                .only(&[LEGACY_PORT_ENV])
                .map(|_| "server.port".into()),
        );

        // Taken verbatim so values such as `STATE=12345` stay strings
        for (name, key) in LEGACY_STRING_ENV {
            if let Ok(value) = std::env::var(name) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

fn check_url(field: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::invalid(field, format!("{value:?} is not a valid URL: {e}")))
}

impl ConfigLoader<Config> for Config {
    fn load(path: Option<PathBuf>) -> Result<Config, ConfigError> {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let figment =
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));

        Config::from_figment(Config::layered(figment))
    }

    fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::invalid(
                "config",
                format!("file {} does not exist", path.display()),
            ));
        }

        let figment =
            Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));

        Config::from_figment(Config::layered(figment))
    }

    fn apply_env_overrides(config: &mut Config, prefix: &str) -> Result<(), ConfigError> {
        let figment = Figment::from(Serialized::defaults(config.clone()))
            .merge(Env::prefixed(prefix).split("__"));

        *config = Config::from_figment(figment)?;

        Ok(())
    }
}

//! Server lifecycle for the Webex OAuth integration

use crate::{
    api,
    config::Config,
    error::{Error, Result},
    oauth::{self, TokenExchanger},
    services::PostAuthAction,
    webex::{SpacesApi, WebexClient},
};
use axum::Router;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Shared application state, read-only for the process lifetime
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Link served on the landing page
    pub authorize_url: Arc<str>,

    /// Authorization code exchange
    pub exchanger: TokenExchanger,

    /// Onboarding run once a token is issued
    pub post_auth: PostAuthAction,
}

impl AppState {
    /// Wire the state against the real Webex API
    pub fn new(config: Config) -> Result<Self> {
        let http = build_http_client(&config)?;
        let spaces = Arc::new(WebexClient::new(http.clone(), &config.webex.api_base_url));
        Ok(Self::with_spaces(config, http, spaces))
    }

    /// Wire the state against any [`SpacesApi`] implementation
    pub fn with_spaces(config: Config, http: reqwest::Client, spaces: Arc<dyn SpacesApi>) -> Self {
        let authorize_url: Arc<str> = oauth::authorize_url(&config).into();
        let exchanger = TokenExchanger::new(http, &config);
        let post_auth = PostAuthAction::new(
            spaces,
            config.webex.bot_token.clone(),
            config.webex.space_id.clone(),
        );

        Self {
            config: Arc::new(config),
            authorize_url,
            exchanger,
            post_auth,
        }
    }
}

/// One client shared by the token exchange and the Webex API calls
fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.webex.outbound_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Main server structure
pub struct Server {
    config: Arc<Config>,
    app: Router,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing Webex OAuth integration server");

        let state = AppState::new(config)?;
        let config = state.config.clone();
        let app = api::router(state);

        Ok(Self { config, app })
    }

    /// Run the server until shutdown signal
    pub async fn run(self) -> Result<()> {
        let addr = self.config.server.bind_address();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Internal {
                message: format!("Failed to bind to address {addr}: {e}"),
            })?;

        info!("Webex OAuth integration listening on {}", addr);
        info!(
            redirect_uri = %self.config.redirect_uri(),
            "Open http://localhost:{}/ to start the flow",
            addr.port()
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Internal {
                message: format!("Server error: {e}"),
            })?;

        Ok(())
    }
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down");
        },
    }
}

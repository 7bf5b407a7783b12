//! # Webex OAuth Integration
//!
//! Runs the OAuth 2.0 authorization code grant against Webex on behalf of a
//! browser user, then has a bot add that user to a demo space and opens the
//! space in the Webex widget.
//!
//! ## Flow
//!
//! - `GET /index.html` links to the provider authorization page
//! - the provider redirects back to the callback route with `code` and `state`
//! - the code is exchanged for tokens at the token endpoint
//! - the bot adds the user to the configured space
//! - the user's access token opens the space widget

pub mod api;
pub mod config;
pub mod error;
pub mod oauth;
pub mod pages;
pub mod server;
pub mod services;
pub mod webex;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, FlowError, Result};
pub use server::{AppState, Server};

/// Version of the webex-oauth crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

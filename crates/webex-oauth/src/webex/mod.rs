//! Webex People and Memberships API access
//!
//! The post-authorization step only needs two calls: who is the user behind
//! an access token, and add an email to a space. [`SpacesApi`] is the seam
//! between that step and the HTTP client in [`client`].

pub mod client;

pub use client::WebexClient;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use webex_oauth_common::Secret;

pub const CONFLICT: u16 = 409;

/// Collaborator API used after the token exchange
#[async_trait]
pub trait SpacesApi: Send + Sync {
    /// Profile of the user owning `access_token`
    async fn person_me(&self, access_token: &Secret) -> Result<Person, ApiFailure>;

    /// Add `email` to `space_id`, acting as the owner of `bot_token`.
    ///
    /// Any 2xx status is a success. The membership record is returned when
    /// the response body carries one.
    async fn add_membership(
        &self,
        bot_token: &Secret,
        space_id: &str,
        email: &str,
    ) -> Result<Option<Membership>, ApiFailure>;
}

/// Subset of the Webex person record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    pub display_name: Option<String>,
}

impl Person {
    /// First address of the record
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .first()
            .map(String::as_str)
            .filter(|e| !e.is_empty())
    }
}

/// Subset of the Webex membership record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: Option<String>,
    pub room_id: Option<String>,
    pub person_email: Option<String>,
}

/// A failed collaborator call.
///
/// `status` is set whenever an HTTP response was received. Collaborators that
/// only surface text can leave it empty; [`ApiFailure::status_code`] then falls
/// back to reading the status out of the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiFailure {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status.or_else(|| status_from_message(&self.message))
    }

    /// The target is already a member of the space
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(CONFLICT)
    }
}

static STATUS_IN_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rec(?:ei|ie)ved error (\d{3}) for a [A-Z]+ request")
        .expect("status pattern is a valid regex")
});

/// Recover an HTTP status from messages shaped like
/// `received error 409 for a POST request to ...`.
///
/// Both spellings of "received" are accepted since older Webex SDKs emit
/// "recieved".
pub fn status_from_message(message: &str) -> Option<u16> {
    STATUS_IN_MESSAGE
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

//! What the integration does once it holds a user's access token
//!
//! The bot adds the authorized user to the demo space, then the space opens
//! in the widget:
//!
//! ```text
//! LookingUpPerson --ok--> AddingMember --ok / 409--> Done
//!        |                     |
//!        +------> Failed <-----+
//! ```
//!
//! No step is retried.

use crate::{
    error::FlowError,
    pages,
    webex::{ApiFailure, SpacesApi},
};
use std::{fmt, sync::Arc};
use tracing::{info, warn};
use webex_oauth_common::Secret;

/// Stage of the post-authorization sequence, recorded on log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAuthStage {
    LookingUpPerson,
    AddingMember,
    Done,
    Failed,
}

impl fmt::Display for PostAuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LookingUpPerson => "looking_up_person",
            Self::AddingMember => "adding_member",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Terminal result of the sequence. Both success variants carry the
/// rendered widget document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAuthOutcome {
    PersonLookupFailed(String),
    MembershipAddFailed(String),
    /// The user was already in the space; treated as success
    MembershipAlreadyExists(String),
    Success(String),
}

impl PostAuthOutcome {
    /// The widget document, or the error to report
    pub fn into_result(self) -> Result<String, FlowError> {
        match self {
            Self::Success(document) | Self::MembershipAlreadyExists(document) => Ok(document),
            Self::PersonLookupFailed(message) => Err(FlowError::IdentityLookupFailed(message)),
            Self::MembershipAddFailed(message) => Err(FlowError::MembershipAddFailed(message)),
        }
    }
}

/// Adds authorized users to the configured space
#[derive(Clone)]
pub struct PostAuthAction {
    spaces: Arc<dyn SpacesApi>,
    bot_token: Secret,
    space_id: String,
}

impl PostAuthAction {
    pub fn new(spaces: Arc<dyn SpacesApi>, bot_token: Secret, space_id: impl Into<String>) -> Self {
        Self {
            spaces,
            bot_token,
            space_id: space_id.into(),
        }
    }

    pub async fn run(&self, access_token: &Secret) -> PostAuthOutcome {
        let mut stage = PostAuthStage::LookingUpPerson;

        let email = match self.spaces.person_me(access_token).await {
            Ok(person) => match person.primary_email() {
                Some(email) => email.to_string(),
                None => {
                    stage = PostAuthStage::Failed;
                    warn!(%stage, "Person record has no email address");
                    return PostAuthOutcome::PersonLookupFailed(
                        "no email address on your Webex profile".to_string(),
                    );
                }
            },
            Err(failure) => {
                warn!(%stage, status = ?failure.status_code(), "Person lookup failed");
                return PostAuthOutcome::PersonLookupFailed(failure.message);
            }
        };

        stage = PostAuthStage::AddingMember;
        let result = self
            .spaces
            .add_membership(&self.bot_token, &self.space_id, &email)
            .await;

        match result {
            Ok(membership) => {
                stage = PostAuthStage::Done;
                let membership_id = membership.and_then(|m| m.id);
                info!(%stage, ?membership_id, "User added to the space");
                PostAuthOutcome::Success(self.widget(access_token))
            }
            Err(failure) if failure.is_conflict() => {
                stage = PostAuthStage::Done;
                info!(%stage, "User already in the space, continuing");
                PostAuthOutcome::MembershipAlreadyExists(self.widget(access_token))
            }
            Err(ApiFailure { status, message }) => {
                warn!(%stage, ?status, "Could not add the user to the space");
                PostAuthOutcome::MembershipAddFailed(message)
            }
        }
    }

    fn widget(&self, access_token: &Secret) -> String {
        pages::widget_page(access_token.expose(), &self.space_id)
    }
}

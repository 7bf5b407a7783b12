//! Business services run by the route handlers

pub mod post_auth;

pub use post_auth::{PostAuthAction, PostAuthOutcome, PostAuthStage};

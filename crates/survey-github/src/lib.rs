//! # survey-github
//!
//! GitHub OAuth integration: the authorization-code client and the
//! process-local pending-state store used for replay protection.

pub mod client;
pub mod state;

pub use client::{GithubClient, GithubError, GithubUser, OAUTH_SCOPES};
pub use state::StateStore;

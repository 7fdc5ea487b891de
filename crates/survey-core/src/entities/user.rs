//! User entity - an account bound to a GitHub identity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// User entity representing an authenticated GitHub account
///
/// Created on first successful OAuth login and refreshed from the GitHub
/// profile on every subsequent login. Never deleted by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    /// GitHub account id - globally unique, the external identity key
    pub github_id: i64,
    pub github_username: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Create a new User from a GitHub profile (first login)
    pub fn new(
        github_id: i64,
        github_username: String,
        email: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            github_id,
            github_username,
            email,
            avatar_url,
            is_admin: false,
            created_at: now,
            last_login_at: now,
        }
    }

    /// Refresh profile fields from GitHub and stamp the login time
    pub fn record_login(
        &mut self,
        github_username: String,
        email: Option<String>,
        avatar_url: Option<String>,
    ) {
        self.github_username = github_username;
        self.email = email;
        self.avatar_url = avatar_url;
        self.last_login_at = Utc::now();
    }
}

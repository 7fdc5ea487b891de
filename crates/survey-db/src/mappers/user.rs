//! User entity <-> model mapper

use survey_core::entities::User;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            github_id: model.github_id,
            github_username: model.github_username,
            email: model.email,
            avatar_url: model.avatar_url,
            is_admin: model.is_admin,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
        }
    }
}

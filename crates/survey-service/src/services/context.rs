//! Service context - dependency container for services
//!
//! Holds the repositories, the OAuth client, and the session token service
//! that the services operate on.

use std::sync::Arc;

use survey_common::auth::JwtService;
use survey_core::traits::{ResponseRepository, SurveyRepository, UserRepository};
use survey_db::PgPool;
use survey_github::{GithubClient, StateStore};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The GitHub OAuth client and pending-state store
/// - JWT service for session tokens
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    survey_repo: Arc<dyn SurveyRepository>,
    response_repo: Arc<dyn ResponseRepository>,

    // GitHub OAuth
    github_client: Arc<GithubClient>,
    state_store: Arc<StateStore>,

    // Services
    jwt_service: Arc<JwtService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        survey_repo: Arc<dyn SurveyRepository>,
        response_repo: Arc<dyn ResponseRepository>,
        github_client: Arc<GithubClient>,
        state_store: Arc<StateStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            survey_repo,
            response_repo,
            github_client,
            state_store,
            jwt_service,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the survey repository
    pub fn survey_repo(&self) -> &dyn SurveyRepository {
        self.survey_repo.as_ref()
    }

    /// Get the response repository
    pub fn response_repo(&self) -> &dyn ResponseRepository {
        self.response_repo.as_ref()
    }

    // === GitHub OAuth ===

    /// Get the GitHub OAuth client
    pub fn github_client(&self) -> &GithubClient {
        self.github_client.as_ref()
    }

    /// Get the OAuth pending-state store
    pub fn state_store(&self) -> &StateStore {
        self.state_store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    survey_repo: Option<Arc<dyn SurveyRepository>>,
    response_repo: Option<Arc<dyn ResponseRepository>>,
    github_client: Option<Arc<GithubClient>>,
    state_store: Option<Arc<StateStore>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            survey_repo: None,
            response_repo: None,
            github_client: None,
            state_store: None,
            jwt_service: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn survey_repo(mut self, repo: Arc<dyn SurveyRepository>) -> Self {
        self.survey_repo = Some(repo);
        self
    }

    pub fn response_repo(mut self, repo: Arc<dyn ResponseRepository>) -> Self {
        self.response_repo = Some(repo);
        self
    }

    pub fn github_client(mut self, client: Arc<GithubClient>) -> Self {
        self.github_client = Some(client);
        self
    }

    pub fn state_store(mut self, store: Arc<StateStore>) -> Self {
        self.state_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.survey_repo
                .ok_or_else(|| ServiceError::validation("survey_repo is required"))?,
            self.response_repo
                .ok_or_else(|| ServiceError::validation("response_repo is required"))?,
            self.github_client
                .ok_or_else(|| ServiceError::validation("github_client is required"))?,
            self.state_store
                .ok_or_else(|| ServiceError::validation("state_store is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

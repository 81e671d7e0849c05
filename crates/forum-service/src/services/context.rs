//! Service context - dependency container for services
//!
//! Holds the repositories, the id generator and the notification emitter
//! needed by services.

use std::sync::Arc;

use forum_core::traits::{
    DiscussionRepository, LikeRepository, NotificationRepository, ReplyRepository,
};
use forum_core::value_objects::Actor;
use forum_core::{DomainError, Snowflake, SnowflakeGenerator};

use super::emitter::NotificationEmitter;
use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// Cloning is cheap; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    discussion_repo: Arc<dyn DiscussionRepository>,
    reply_repo: Arc<dyn ReplyRepository>,
    like_repo: Arc<dyn LikeRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    // Notifications
    emitter: NotificationEmitter,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        discussion_repo: Arc<dyn DiscussionRepository>,
        reply_repo: Arc<dyn ReplyRepository>,
        like_repo: Arc<dyn LikeRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let emitter = NotificationEmitter::new(
            Arc::clone(&notification_repo),
            Arc::clone(&snowflake_generator),
        );

        Self {
            discussion_repo,
            reply_repo,
            like_repo,
            notification_repo,
            emitter,
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the discussion repository
    pub fn discussion_repo(&self) -> &dyn DiscussionRepository {
        self.discussion_repo.as_ref()
    }

    /// Get the reply repository
    pub fn reply_repo(&self) -> &dyn ReplyRepository {
        self.reply_repo.as_ref()
    }

    /// Get the like repository
    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Notifications ===

    pub fn emitter(&self) -> &NotificationEmitter {
        &self.emitter
    }

    // === Services ===

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Resolve the acting user or fail with `AuthenticationRequired`
pub fn require_actor(actor: Option<&Actor>) -> ServiceResult<&Actor> {
    actor.ok_or(ServiceError::Domain(DomainError::AuthenticationRequired))
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    discussion_repo: Option<Arc<dyn DiscussionRepository>>,
    reply_repo: Option<Arc<dyn ReplyRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: S) -> Self
    where
        S: DiscussionRepository
            + ReplyRepository
            + LikeRepository
            + NotificationRepository
            + 'static,
    {
        let store = Arc::new(store);
        self.discussion_repo(store.clone())
            .reply_repo(store.clone())
            .like_repo(store.clone())
            .notification_repo(store)
    }

    pub fn discussion_repo(mut self, repo: Arc<dyn DiscussionRepository>) -> Self {
        self.discussion_repo = Some(repo);
        self
    }

    pub fn reply_repo(mut self, repo: Arc<dyn ReplyRepository>) -> Self {
        self.reply_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.discussion_repo
                .ok_or_else(|| ServiceError::validation("discussion_repo is required"))?,
            self.reply_repo
                .ok_or_else(|| ServiceError::validation("reply_repo is required"))?,
            self.like_repo
                .ok_or_else(|| ServiceError::validation("like_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
        ))
    }
}

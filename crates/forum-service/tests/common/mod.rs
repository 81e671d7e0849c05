//! Shared fixtures for service tests
//!
//! Every test gets its own in-memory store. `alice`, `bob` and `carol` are
//! plain members; `mod_mia` is a moderator.

#![allow(dead_code)]

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use forum_core::entities::{DiscussionCategory, Notification};
use forum_core::traits::{NotificationQuery, NotificationRepository, RepoResult};
use forum_core::value_objects::{Actor, ActorRole};
use forum_core::{DomainError, Snowflake, SnowflakeGenerator};
use forum_db::InMemoryStore;
use forum_service::dto::{CreateDiscussionRequest, DiscussionResponse, PostReplyRequest, ReplyResponse};
use forum_service::{
    DiscussionService, ReplyService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};

pub fn alice() -> Actor {
    Actor::member(Snowflake::new(1))
}

pub fn bob() -> Actor {
    Actor::member(Snowflake::new(2))
}

pub fn carol() -> Actor {
    Actor::member(Snowflake::new(3))
}

pub fn mod_mia() -> Actor {
    Actor::new(Snowflake::new(9), ActorRole::Moderator)
}

/// Service context plus a handle on the store behind it
pub struct Forum {
    pub ctx: ServiceContext,
    pub store: InMemoryStore,
}

pub fn forum() -> Forum {
    let store = InMemoryStore::new();
    let ctx = ServiceContextBuilder::new()
        .store(store.clone())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .unwrap();
    Forum { ctx, store }
}

/// A forum whose notification storage is always down
pub fn forum_with_failing_notifications() -> Forum {
    let store = InMemoryStore::new();
    let shared = Arc::new(store.clone());
    let ctx = ServiceContextBuilder::new()
        .discussion_repo(shared.clone())
        .reply_repo(shared.clone())
        .like_repo(shared)
        .notification_repo(Arc::new(FailingNotificationRepo))
        .build()
        .unwrap();
    Forum { ctx, store }
}

pub struct FailingNotificationRepo;

#[async_trait]
impl NotificationRepository for FailingNotificationRepo {
    async fn create(&self, _notification: &Notification) -> RepoResult<()> {
        Err(DomainError::GatewayUnavailable("notification store offline".to_string()))
    }

    async fn find_by_recipient(
        &self,
        _recipient_id: Snowflake,
        _query: NotificationQuery,
    ) -> RepoResult<Vec<Notification>> {
        Err(DomainError::GatewayUnavailable("notification store offline".to_string()))
    }

    async fn unread_count(&self, _recipient_id: Snowflake) -> RepoResult<i64> {
        Err(DomainError::GatewayUnavailable("notification store offline".to_string()))
    }

    async fn mark_read(&self, _id: Snowflake, _recipient_id: Snowflake) -> RepoResult<bool> {
        Err(DomainError::GatewayUnavailable("notification store offline".to_string()))
    }

    async fn mark_all_read(&self, _recipient_id: Snowflake) -> RepoResult<u64> {
        Err(DomainError::GatewayUnavailable("notification store offline".to_string()))
    }
}

pub async fn open_discussion(ctx: &ServiceContext, author: &Actor) -> DiscussionResponse {
    DiscussionService::new(ctx)
        .create_discussion(
            Some(author),
            CreateDiscussionRequest {
                title: "Best software for parametric facades?".to_string(),
                content: "Grasshopper or Dynamo, and why?".to_string(),
                category: DiscussionCategory::TechnicalQuestions,
                tags: vec!["parametric".to_string()],
            },
        )
        .await
        .unwrap()
}

pub async fn post_reply(
    ctx: &ServiceContext,
    author: &Actor,
    discussion_id: Snowflake,
    content: &str,
    parent_id: Option<Snowflake>,
) -> ServiceResult<ReplyResponse> {
    ReplyService::new(ctx)
        .post_reply(
            Some(author),
            discussion_id,
            PostReplyRequest {
                content: content.to_string(),
                parent_id,
            },
        )
        .await
}

/// Unwrap the domain error of a failed call
pub fn domain_error<T: Debug>(result: ServiceResult<T>) -> DomainError {
    match result {
        Err(ServiceError::Domain(e)) => e,
        other => panic!("expected a domain error, got {other:?}"),
    }
}

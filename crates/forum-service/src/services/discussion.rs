//! Discussion service
//!
//! Creating, reading, listing, liking and pinning discussions.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, instrument};

use forum_core::entities::{Discussion, LikeTarget};
use forum_core::events::{DomainEvent, LikeAddedEvent};
use forum_core::traits::{DiscussionCursor, DiscussionQuery};
use forum_core::value_objects::Actor;
use forum_core::{DomainError, Snowflake};

use crate::dto::{
    CreateDiscussionRequest, DiscussionResponse, LikeResponse, ListDiscussionsQuery, PageResponse,
};

use super::context::{require_actor, ServiceContext};
use super::error::ServiceResult;

/// Discussion service
pub struct DiscussionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DiscussionService<'a> {
    /// Create a new DiscussionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open a new discussion authored by the actor
    #[instrument(skip(self, actor, request))]
    pub async fn create_discussion(
        &self,
        actor: Option<&Actor>,
        request: CreateDiscussionRequest,
    ) -> ServiceResult<DiscussionResponse> {
        let actor = require_actor(actor)?;

        let discussion = Discussion::new(
            self.ctx.generate_id(),
            actor.id,
            &request.title,
            request.content,
            request.category,
            request.tags,
        )?;

        self.ctx.discussion_repo().create(&discussion).await?;

        info!(
            discussion_id = %discussion.id,
            author_id = %actor.id,
            category = %discussion.category,
            "Discussion created"
        );

        Ok(DiscussionResponse::for_viewer(&discussion, Some(actor), false))
    }

    /// Fetch a discussion for its detail page. Every call counts one view.
    #[instrument(skip(self, actor))]
    pub async fn get_discussion(
        &self,
        actor: Option<&Actor>,
        discussion_id: Snowflake,
    ) -> ServiceResult<DiscussionResponse> {
        let discussion = self
            .ctx
            .discussion_repo()
            .record_view(discussion_id)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        let liked = self
            .liked_by(actor, LikeTarget::Discussion(discussion_id))
            .await?;

        Ok(DiscussionResponse::for_viewer(&discussion, actor, liked))
    }

    /// List discussions, pinned first, then newest first. Does not count views.
    #[instrument(skip(self, actor))]
    pub async fn list_discussions(
        &self,
        actor: Option<&Actor>,
        query: &ListDiscussionsQuery,
    ) -> ServiceResult<PageResponse<DiscussionResponse>> {
        let limit = query.limit();
        let discussions = self
            .ctx
            .discussion_repo()
            .list(DiscussionQuery::from(query))
            .await?;

        let liked: HashSet<Snowflake> = match actor {
            Some(actor) if !discussions.is_empty() => {
                let ids: Vec<Snowflake> = discussions.iter().map(|d| d.id).collect();
                self.ctx
                    .like_repo()
                    .liked_discussions(actor.id, &ids)
                    .await?
                    .into_iter()
                    .collect()
            }
            _ => HashSet::new(),
        };

        let data = discussions
            .iter()
            .map(|d| DiscussionResponse::for_viewer(d, actor, liked.contains(&d.id)))
            .collect();

        // A short page is the last one
        let cursor = if i64::try_from(discussions.len()).is_ok_and(|n| n >= limit) {
            discussions.last().map(DiscussionCursor::at)
        } else {
            None
        };

        Ok(PageResponse::new(data, cursor))
    }

    /// Like or unlike a discussion
    #[instrument(skip(self, actor))]
    pub async fn toggle_like(
        &self,
        actor: Option<&Actor>,
        discussion_id: Snowflake,
    ) -> ServiceResult<LikeResponse> {
        let actor = require_actor(actor)?;

        let discussion = self
            .ctx
            .discussion_repo()
            .find_by_id(discussion_id)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        let target = LikeTarget::Discussion(discussion_id);
        let toggle = self.ctx.like_repo().toggle(actor.id, target).await?;

        info!(
            discussion_id = %discussion_id,
            actor_id = %actor.id,
            liked = toggle.liked,
            likes_count = toggle.likes_count,
            "Discussion like toggled"
        );

        if toggle.liked {
            self.ctx
                .emitter()
                .dispatch(&DomainEvent::LikeAdded(LikeAddedEvent {
                    target,
                    discussion_id,
                    actor_id: actor.id,
                    target_author_id: discussion.author_id,
                    likes_count: toggle.likes_count,
                    timestamp: Utc::now(),
                }))
                .await;
        }

        Ok(LikeResponse::from(toggle))
    }

    /// Pin or unpin a discussion (moderators only)
    #[instrument(skip(self, actor))]
    pub async fn set_pinned(
        &self,
        actor: Option<&Actor>,
        discussion_id: Snowflake,
        pinned: bool,
    ) -> ServiceResult<DiscussionResponse> {
        let actor = require_actor(actor)?;
        if !actor.role.can_moderate() {
            return Err(DomainError::NotAuthorized(
                "only moderators can pin discussions".to_string(),
            )
            .into());
        }

        let discussion = self
            .ctx
            .discussion_repo()
            .set_pinned(discussion_id, pinned)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        info!(
            discussion_id = %discussion_id,
            actor_id = %actor.id,
            pinned,
            "Discussion pin updated"
        );

        let liked = self.liked_by(Some(actor), LikeTarget::Discussion(discussion_id)).await?;
        Ok(DiscussionResponse::for_viewer(&discussion, Some(actor), liked))
    }

    async fn liked_by(&self, actor: Option<&Actor>, target: LikeTarget) -> ServiceResult<bool> {
        match actor {
            Some(actor) => Ok(self.ctx.like_repo().exists(actor.id, target).await?),
            None => Ok(false),
        }
    }
}

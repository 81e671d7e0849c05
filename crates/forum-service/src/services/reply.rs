//! Reply service
//!
//! Posting, listing and liking replies. Replies nest at most one level: a
//! reply may answer the discussion or a top-level reply of the same
//! discussion, never a nested one.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, instrument};

use forum_core::entities::{LikeTarget, Reply};
use forum_core::events::{DomainEvent, LikeAddedEvent, ReplyPostedEvent};
use forum_core::value_objects::Actor;
use forum_core::{DomainError, Snowflake};

use crate::dto::{LikeResponse, PostReplyRequest, ReplyResponse};

use super::context::{require_actor, ServiceContext};
use super::error::ServiceResult;

/// Reply service
pub struct ReplyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReplyService<'a> {
    /// Create a new ReplyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a reply and notify the discussion author
    #[instrument(skip(self, actor, request), fields(parent_id = ?request.parent_id))]
    pub async fn post_reply(
        &self,
        actor: Option<&Actor>,
        discussion_id: Snowflake,
        request: PostReplyRequest,
    ) -> ServiceResult<ReplyResponse> {
        let actor = require_actor(actor)?;

        let reply = Reply::new(
            self.ctx.generate_id(),
            discussion_id,
            actor.id,
            request.content,
            request.parent_id,
        )?;

        let discussion = self
            .ctx
            .discussion_repo()
            .find_by_id(discussion_id)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        if let Some(parent_id) = reply.parent_id {
            self.ctx
                .reply_repo()
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| {
                    DomainError::InvalidParent(format!("parent reply {parent_id} does not exist"))
                })?
                .ensure_can_parent(discussion_id)?;
        }

        let replies_count = self.ctx.reply_repo().create(&reply).await?;

        info!(
            reply_id = %reply.id,
            discussion_id = %discussion_id,
            author_id = %actor.id,
            replies_count,
            "Reply posted"
        );

        self.ctx
            .emitter()
            .dispatch(&DomainEvent::ReplyPosted(ReplyPostedEvent {
                discussion_id,
                reply_id: reply.id,
                parent_id: reply.parent_id,
                reply_author_id: actor.id,
                discussion_author_id: discussion.author_id,
                replies_count,
                timestamp: Utc::now(),
            }))
            .await;

        Ok(ReplyResponse::for_viewer(&reply, Some(actor), false))
    }

    /// All replies of a discussion, oldest first
    #[instrument(skip(self, actor))]
    pub async fn list_replies(
        &self,
        actor: Option<&Actor>,
        discussion_id: Snowflake,
    ) -> ServiceResult<Vec<ReplyResponse>> {
        if self
            .ctx
            .discussion_repo()
            .find_by_id(discussion_id)
            .await?
            .is_none()
        {
            return Err(DomainError::DiscussionNotFound(discussion_id).into());
        }

        let replies = self.ctx.reply_repo().find_by_discussion(discussion_id).await?;

        let liked: HashSet<Snowflake> = match actor {
            Some(actor) => self
                .ctx
                .like_repo()
                .liked_replies(actor.id, discussion_id)
                .await?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        Ok(replies
            .iter()
            .map(|r| ReplyResponse::for_viewer(r, actor, liked.contains(&r.id)))
            .collect())
    }

    /// Like or unlike a reply
    #[instrument(skip(self, actor))]
    pub async fn toggle_like(
        &self,
        actor: Option<&Actor>,
        reply_id: Snowflake,
    ) -> ServiceResult<LikeResponse> {
        let actor = require_actor(actor)?;

        let reply = self
            .ctx
            .reply_repo()
            .find_by_id(reply_id)
            .await?
            .ok_or(DomainError::ReplyNotFound(reply_id))?;

        let target = LikeTarget::Reply(reply_id);
        let toggle = self.ctx.like_repo().toggle(actor.id, target).await?;

        info!(
            reply_id = %reply_id,
            actor_id = %actor.id,
            liked = toggle.liked,
            likes_count = toggle.likes_count,
            "Reply like toggled"
        );

        if toggle.liked {
            self.ctx
                .emitter()
                .dispatch(&DomainEvent::LikeAdded(LikeAddedEvent {
                    target,
                    discussion_id: reply.discussion_id,
                    actor_id: actor.id,
                    target_author_id: reply.author_id,
                    likes_count: toggle.likes_count,
                    timestamp: Utc::now(),
                }))
                .await;
        }

        Ok(LikeResponse::from(toggle))
    }
}

//! Solution service
//!
//! A discussion author may accept exactly one reply as the solution. The
//! transition is one-way; there is no way to unmark.

use chrono::Utc;
use tracing::{info, instrument};

use forum_core::entities::LikeTarget;
use forum_core::events::{DomainEvent, SolutionMarkedEvent};
use forum_core::value_objects::Actor;
use forum_core::{DomainError, Snowflake};

use crate::dto::{DiscussionResponse, ReplyResponse, SolutionResponse};

use super::context::{require_actor, ServiceContext};
use super::error::ServiceResult;

/// Solution service
pub struct SolutionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SolutionService<'a> {
    /// Create a new SolutionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Accept `reply_id` as the solution of `discussion_id`.
    ///
    /// Checks run in a fixed order so callers get a stable error:
    /// authentication, discussion existence, authorship, solved state, then
    /// reply membership. The final write is re-checked atomically by the
    /// repository, so a concurrent winner turns this call into `AlreadySolved`.
    #[instrument(skip(self, actor))]
    pub async fn mark_solution(
        &self,
        actor: Option<&Actor>,
        discussion_id: Snowflake,
        reply_id: Snowflake,
    ) -> ServiceResult<SolutionResponse> {
        let actor = require_actor(actor)?;

        let discussion = self
            .ctx
            .discussion_repo()
            .find_by_id(discussion_id)
            .await?
            .ok_or(DomainError::DiscussionNotFound(discussion_id))?;

        discussion.ensure_can_mark_solution(actor.id)?;

        let reply = self
            .ctx
            .reply_repo()
            .find_by_id(reply_id)
            .await?
            .filter(|r| r.discussion_id == discussion_id)
            .ok_or(DomainError::ReplyNotFound(reply_id))?;

        let (discussion, reply) = self
            .ctx
            .reply_repo()
            .mark_solution(discussion.id, reply.id)
            .await?;

        info!(
            discussion_id = %discussion.id,
            reply_id = %reply.id,
            actor_id = %actor.id,
            "Solution marked"
        );

        self.ctx
            .emitter()
            .dispatch(&DomainEvent::SolutionMarked(SolutionMarkedEvent {
                discussion_id: discussion.id,
                reply_id: reply.id,
                discussion_author_id: discussion.author_id,
                reply_author_id: reply.author_id,
                timestamp: Utc::now(),
            }))
            .await;

        // Committed at this point, view lookups are best-effort
        let likes = self.ctx.like_repo();
        let liked_discussion = likes
            .exists(actor.id, LikeTarget::Discussion(discussion.id))
            .await
            .unwrap_or(false);
        let liked_reply = likes
            .exists(actor.id, LikeTarget::Reply(reply.id))
            .await
            .unwrap_or(false);

        Ok(SolutionResponse {
            discussion: DiscussionResponse::for_viewer(&discussion, Some(actor), liked_discussion),
            reply: ReplyResponse::for_viewer(&reply, Some(actor), liked_reply),
        })
    }
}

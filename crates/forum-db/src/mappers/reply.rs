//! Reply entity <-> model mapper

use forum_core::entities::Reply;
use forum_core::value_objects::Snowflake;

use crate::models::ReplyModel;

impl From<ReplyModel> for Reply {
    fn from(model: ReplyModel) -> Self {
        Reply {
            id: Snowflake::new(model.id),
            discussion_id: Snowflake::new(model.discussion_id),
            parent_id: model.parent_id.map(Snowflake::new),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            is_solution: model.is_solution,
            likes_count: model.likes_count,
            created_at: model.created_at,
        }
    }
}

/// Column values for inserting a new reply
pub struct ReplyInsert<'a> {
    pub id: i64,
    pub discussion_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub content: &'a str,
}

impl<'a> ReplyInsert<'a> {
    pub fn new(reply: &'a Reply) -> Self {
        Self {
            id: reply.id.into_inner(),
            discussion_id: reply.discussion_id.into_inner(),
            parent_id: reply.parent_id.map(Snowflake::into_inner),
            author_id: reply.author_id.into_inner(),
            content: &reply.content,
        }
    }
}

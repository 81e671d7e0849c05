//! Discussion entity <-> model mapper

use forum_core::entities::Discussion;
use forum_core::error::DomainError;
use forum_core::value_objects::Snowflake;

use crate::models::DiscussionModel;

impl TryFrom<DiscussionModel> for Discussion {
    type Error = DomainError;

    fn try_from(model: DiscussionModel) -> Result<Self, Self::Error> {
        Ok(Discussion {
            id: Snowflake::new(model.id),
            title: model.title,
            content: model.content,
            category: model.category.parse()?,
            tags: model.tags.into_iter().collect(),
            author_id: Snowflake::new(model.author_id),
            is_solved: model.is_solved,
            is_pinned: model.is_pinned,
            views_count: model.views_count,
            replies_count: model.replies_count,
            likes_count: model.likes_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Column values for inserting a new discussion
pub struct DiscussionInsert<'a> {
    pub id: i64,
    pub title: &'a str,
    pub content: &'a str,
    pub category: &'static str,
    pub tags: Vec<&'a str>,
    pub author_id: i64,
}

impl<'a> DiscussionInsert<'a> {
    pub fn new(discussion: &'a Discussion) -> Self {
        Self {
            id: discussion.id.into_inner(),
            title: &discussion.title,
            content: &discussion.content,
            category: discussion.category.as_str(),
            tags: discussion.tags.iter().map(String::as_str).collect(),
            author_id: discussion.author_id.into_inner(),
        }
    }
}

//! Discussion entity - a top-level Q&A thread

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Fixed set of discussion categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscussionCategory {
    #[default]
    General,
    DesignHelp,
    TechnicalQuestions,
    CareerAdvice,
    PortfolioReview,
    Resources,
}

impl DiscussionCategory {
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::DesignHelp,
        Self::TechnicalQuestions,
        Self::CareerAdvice,
        Self::PortfolioReview,
        Self::Resources,
    ];

    /// Storage / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::DesignHelp => "design_help",
            Self::TechnicalQuestions => "technical_questions",
            Self::CareerAdvice => "career_advice",
            Self::PortfolioReview => "portfolio_review",
            Self::Resources => "resources",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General Discussion",
            Self::DesignHelp => "Design Help",
            Self::TechnicalQuestions => "Technical Questions",
            Self::CareerAdvice => "Career Advice",
            Self::PortfolioReview => "Portfolio Review",
            Self::Resources => "Resources",
        }
    }
}

impl fmt::Display for DiscussionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscussionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown category: {s}")))
    }
}

/// Solving lifecycle of a discussion
///
/// `Open -> Solved` is the only transition and it cannot be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionState {
    Open,
    Solved,
}

impl SolutionState {
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Open, Self::Solved))
    }
}

/// Discussion entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discussion {
    pub id: Snowflake,
    pub title: String,
    pub content: String,
    pub category: DiscussionCategory,
    pub tags: BTreeSet<String>,
    pub author_id: Snowflake,
    pub is_solved: bool,
    pub is_pinned: bool,
    pub views_count: i64,
    pub replies_count: i64,
    pub likes_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    pub const MAX_TITLE_LENGTH: usize = 200;
    pub const MAX_CONTENT_LENGTH: usize = 20_000;
    pub const MAX_TAGS: usize = 10;
    pub const MAX_TAG_LENGTH: usize = 32;

    /// Create a new, open discussion with zeroed counters
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        title: &str,
        content: String,
        category: DiscussionCategory,
        tags: impl IntoIterator<Item = String>,
    ) -> Result<Self, DomainError> {
        require_text("title", title, Self::MAX_TITLE_LENGTH)?;
        require_text("content", &content, Self::MAX_CONTENT_LENGTH)?;
        let tags = Self::normalize_tags(tags)?;

        let now = Utc::now();
        Ok(Self {
            id,
            title: title.trim().to_string(),
            content,
            category,
            tags,
            author_id,
            is_solved: false,
            is_pinned: false,
            views_count: 0,
            replies_count: 0,
            likes_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Trim, lowercase and deduplicate tags, dropping blanks
    pub fn normalize_tags(
        tags: impl IntoIterator<Item = String>,
    ) -> Result<BTreeSet<String>, DomainError> {
        let mut normalized = BTreeSet::new();
        for tag in tags {
            let tag = tag.trim().to_lowercase();
            if tag.is_empty() {
                continue;
            }
            if tag.chars().count() > Self::MAX_TAG_LENGTH {
                return Err(DomainError::ValidationError(format!(
                    "tag longer than {} characters",
                    Self::MAX_TAG_LENGTH
                )));
            }
            normalized.insert(tag);
        }
        if normalized.len() > Self::MAX_TAGS {
            return Err(DomainError::ValidationError(format!(
                "at most {} tags allowed",
                Self::MAX_TAGS
            )));
        }
        Ok(normalized)
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    pub fn solution_state(&self) -> SolutionState {
        if self.is_solved {
            SolutionState::Solved
        } else {
            SolutionState::Open
        }
    }

    /// Eligibility for accepting a solution, checked in order:
    /// only the author may mark, and only while the discussion is open.
    pub fn ensure_can_mark_solution(&self, actor_id: Snowflake) -> Result<(), DomainError> {
        if !self.is_author(actor_id) {
            return Err(DomainError::NotAuthorized(
                "only the discussion author can mark a solution".to_string(),
            ));
        }
        if !self.solution_state().can_transition_to(SolutionState::Solved) {
            return Err(DomainError::AlreadySolved(self.id));
        }
        Ok(())
    }

    /// Apply the `Open -> Solved` transition
    pub fn mark_solved(&mut self) -> Result<(), DomainError> {
        if !self.solution_state().can_transition_to(SolutionState::Solved) {
            return Err(DomainError::AlreadySolved(self.id));
        }
        self.is_solved = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag.trim().to_lowercase())
    }
}

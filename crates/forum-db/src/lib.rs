//! # forum-db
//!
//! Persistence gateway for the forum. Implements the repository traits defined in
//! `forum-core` twice:
//!
//! - PostgreSQL via SQLx, where every check-and-set runs inside a transaction
//!   that row-locks the discussion or like target first
//! - [`InMemoryStore`], a process-local store that serializes every operation
//!   behind one mutex, used for tests and the `memory` storage backend
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_db::pool::{create_pool, run_migrations, PoolConfig};
//! use forum_db::PgDiscussionRepository;
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url)).await?;
//!     run_migrations(&pool).await?;
//!     let discussions = PgDiscussionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgDiscussionRepository, PgLikeRepository, PgNotificationRepository, PgReplyRepository,
};

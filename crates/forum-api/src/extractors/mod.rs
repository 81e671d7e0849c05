//! Axum extractors for request handling
//!
//! Custom extractors for the optional actor, validated bodies and query
//! strings, and Snowflake path parameters.

mod auth;
mod path;
mod validated;

pub use auth::OptionalAuthUser;
pub use path::SnowflakePath;
pub use validated::{ValidatedJson, ValidatedQuery};

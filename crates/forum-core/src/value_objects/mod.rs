//! Value objects - immutable types that represent domain concepts

mod actor;
mod snowflake;

pub use actor::{Actor, ActorRole};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};

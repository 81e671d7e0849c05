//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod discussions;
pub mod health;
pub mod notifications;
pub mod replies;

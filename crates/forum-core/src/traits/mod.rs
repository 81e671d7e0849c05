//! Ports implemented by the persistence gateway

mod repositories;

pub use repositories::*;

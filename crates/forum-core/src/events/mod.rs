//! Domain events raised by successful mutations

mod domain_event;

pub use domain_event::*;

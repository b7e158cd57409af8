//! Observer port definitions.

pub mod outbound;

//! Application services
//!
//! Use cases of the observer. Services depend on port traits and the
//! `WorldStore`, not on concrete transports.

pub mod connection_manager;
pub mod feed_paginator;
pub mod world_service;

pub use connection_manager::ConnectionManager;
pub use feed_paginator::{FeedPaginator, LoadOutcome};
pub use world_service::{WorldService, WorldServiceError, DEFAULT_POLL_INTERVAL_MS};

//! Null View Shared - wire-format types for the observer
//!
//! This crate contains the types exchanged with the outside world:
//! - Live stream envelopes (`EventEnvelope`, `EventKind`)
//! - Persisted feed items and their typed payloads
//! - Request bodies and query parameters for the Simulation Service
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and the domain vocabulary
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Lenient decoding** - Optional fields default; unknown event names are kept

pub mod feed;
pub mod messages;
pub mod requests;

pub use feed::{
    ConversationSummary, EpochSummary, FeedItem, FeedItemKind, FeedPayload, PostSummary,
    WikiEditSummary,
};
pub use messages::{EventEnvelope, EventKind};
pub use requests::{
    CreateWorldRequest, FeedPageQuery, ListWorldsQuery, DEFAULT_FEED_PAGE_SIZE,
    MAX_FEED_PAGE_SIZE,
};

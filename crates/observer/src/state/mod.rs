//! Observer state
//!
//! `WorldStore` owns everything; the other modules are the plain data
//! structures it is built from.

pub mod event_log;
pub mod feed_list;
pub mod invalidation;
pub mod notifications;
pub mod world_store;

pub use event_log::{EventLog, EVENT_LOG_CAPACITY};
pub use feed_list::{FeedList, PendingPage};
pub use invalidation::{InvalidationHooks, SnapshotKind};
pub use notifications::{NotificationQueue, DEFAULT_HERALD_TTL_MS};
pub use world_store::{WorldSnapshot, WorldStore, CONVERSATION_PAGE_SIZE};

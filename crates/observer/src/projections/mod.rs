//! View projections
//!
//! Pure functions over snapshots held by the store. Nothing here performs
//! I/O or touches the store lock.

pub mod directory;
pub mod feed_cards;
pub mod relation_matrix;
pub mod ticker;
pub mod transmissions;
pub mod view_state;
pub mod world_listing;

pub use directory::AgentDirectory;
pub use feed_cards::{feed_card, feed_cards, FeedCard};
pub use relation_matrix::{faction_overview, relation_matrix, FactionSummary, RelationMatrix};
pub use ticker::{live_ticker, TickerBuilder, TickerRow, TickerRowKind};
pub use transmissions::{
    agent_relationships, recent_transmissions, AgentRelation, DEFAULT_TRANSMISSION_COUNT,
};
pub use view_state::ViewPhase;
pub use world_listing::{partition_worlds, tag_cloud, ListingPartition};

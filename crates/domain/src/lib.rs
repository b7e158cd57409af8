//! Null View Domain - the vocabulary of an observed simulation.
//!
//! Snapshot entities (agents, factions, relationships, wiki pages, knowledge
//! edges, conversations) are owned by the Simulation Service and replaced
//! wholesale on every fetch. The `World` aggregate is the one record whose
//! clock the observer advances between fetches.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;

pub use aggregates::{
    GenesisProgress, SeedFaction, World, WorldListing, WorldStatus, WorldTag,
    GENESIS_PROGRESS_KEY, SEED_FACTIONS_KEY,
};
pub use entities::{
    Agent, Conversation, ConversationParticipant, Faction, KnowledgeEdge, Notification,
    RelationType, Relationship, WikiPage, WikiStatus, DEFAULT_FACTION_COLOR,
};
pub use error::DomainError;
pub use ids::{
    AgentId, ConversationId, FactionId, NotificationId, RelationshipId, WikiPageId, WorldId,
};

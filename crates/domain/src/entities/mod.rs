//! Domain entities - snapshot records owned by the Simulation Service
//!
//! These are replaced wholesale whenever the observer re-fetches them; none of
//! them is patched field by field on the client.

mod agent;
mod conversation;
mod faction;
mod knowledge;
mod notification;
mod relationship;
mod wiki_page;

pub use agent::Agent;
pub use conversation::{Conversation, ConversationParticipant};
pub use faction::{Faction, DEFAULT_FACTION_COLOR};
pub use knowledge::KnowledgeEdge;
pub use notification::Notification;
pub use relationship::{RelationType, Relationship};
pub use wiki_page::{WikiPage, WikiStatus};

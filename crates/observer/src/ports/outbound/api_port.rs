//! Simulation Service port - HTTP JSON boundary
//!
//! Every snapshot the observer shows is fetched through this trait. Services
//! treat failures as no-ops: an `ApiError` is logged and the prior snapshot
//! stays in place.

use async_trait::async_trait;

use nullview_domain::{
    Agent, Conversation, Faction, KnowledgeEdge, Relationship, WikiPage, World, WorldId,
    WorldListing,
};
use nullview_shared::{CreateWorldRequest, FeedItem, FeedPageQuery, ListWorldsQuery};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SimulationApiPort: Send + Sync {
    /// `GET /api/worlds[?tag=]`
    async fn list_worlds(&self, query: ListWorldsQuery) -> Result<Vec<WorldListing>, ApiError>;

    /// `POST /api/worlds`
    async fn create_world(&self, request: CreateWorldRequest) -> Result<World, ApiError>;

    async fn get_world(&self, world_id: WorldId) -> Result<World, ApiError>;

    async fn start_simulation(&self, world_id: WorldId) -> Result<(), ApiError>;

    async fn stop_simulation(&self, world_id: WorldId) -> Result<(), ApiError>;

    async fn list_agents(&self, world_id: WorldId) -> Result<Vec<Agent>, ApiError>;

    async fn list_factions(&self, world_id: WorldId) -> Result<Vec<Faction>, ApiError>;

    async fn list_relationships(&self, world_id: WorldId) -> Result<Vec<Relationship>, ApiError>;

    async fn list_wiki_pages(&self, world_id: WorldId) -> Result<Vec<WikiPage>, ApiError>;

    async fn knowledge_graph(&self, world_id: WorldId) -> Result<Vec<KnowledgeEdge>, ApiError>;

    async fn list_conversations(
        &self,
        world_id: WorldId,
        limit: u32,
    ) -> Result<Vec<Conversation>, ApiError>;

    /// One page of the persisted feed, newest first.
    async fn feed_page(
        &self,
        world_id: WorldId,
        query: FeedPageQuery,
    ) -> Result<Vec<FeedItem>, ApiError>;
}

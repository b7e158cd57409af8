//! Simulation Service HTTP client (reqwest)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use nullview_domain::{
    Agent, Conversation, Faction, KnowledgeEdge, Relationship, WikiPage, World, WorldId,
    WorldListing,
};
use nullview_shared::{CreateWorldRequest, FeedItem, FeedPageQuery, ListWorldsQuery};

use crate::ports::outbound::{ApiError, SimulationApiPort};

/// Default Simulation Service base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3301";

/// Default per-request timeout. A timed-out request fails like any other.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Client for the Simulation Service JSON API
#[derive(Clone)]
pub struct SimulationClient {
    client: Client,
    base_url: String,
}

impl SimulationClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn world_url(&self, world_id: WorldId, suffix: &str) -> String {
        if suffix.is_empty() {
            self.url(&format!("worlds/{world_id}"))
        } else {
            self.url(&format!("worlds/{world_id}/{suffix}"))
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        Self::send(request)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

impl Default for SimulationClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl SimulationApiPort for SimulationClient {
    async fn list_worlds(&self, query: ListWorldsQuery) -> Result<Vec<WorldListing>, ApiError> {
        Self::send_json(self.client.get(self.url("worlds")).query(&query)).await
    }

    async fn create_world(&self, request: CreateWorldRequest) -> Result<World, ApiError> {
        Self::send_json(self.client.post(self.url("worlds")).json(&request)).await
    }

    async fn get_world(&self, world_id: WorldId) -> Result<World, ApiError> {
        Self::send_json(self.client.get(self.world_url(world_id, ""))).await
    }

    async fn start_simulation(&self, world_id: WorldId) -> Result<(), ApiError> {
        Self::send(self.client.post(self.world_url(world_id, "start"))).await?;
        Ok(())
    }

    async fn stop_simulation(&self, world_id: WorldId) -> Result<(), ApiError> {
        Self::send(self.client.post(self.world_url(world_id, "stop"))).await?;
        Ok(())
    }

    async fn list_agents(&self, world_id: WorldId) -> Result<Vec<Agent>, ApiError> {
        Self::send_json(self.client.get(self.world_url(world_id, "agents"))).await
    }

    async fn list_factions(&self, world_id: WorldId) -> Result<Vec<Faction>, ApiError> {
        Self::send_json(self.client.get(self.world_url(world_id, "factions"))).await
    }

    async fn list_relationships(&self, world_id: WorldId) -> Result<Vec<Relationship>, ApiError> {
        Self::send_json(self.client.get(self.world_url(world_id, "relationships"))).await
    }

    async fn list_wiki_pages(&self, world_id: WorldId) -> Result<Vec<WikiPage>, ApiError> {
        Self::send_json(self.client.get(self.world_url(world_id, "wiki"))).await
    }

    async fn knowledge_graph(&self, world_id: WorldId) -> Result<Vec<KnowledgeEdge>, ApiError> {
        Self::send_json(self.client.get(self.world_url(world_id, "knowledge-graph"))).await
    }

    async fn list_conversations(
        &self,
        world_id: WorldId,
        limit: u32,
    ) -> Result<Vec<Conversation>, ApiError> {
        Self::send_json(
            self.client
                .get(self.world_url(world_id, "conversations"))
                .query(&[("limit", limit)]),
        )
        .await
    }

    async fn feed_page(
        &self,
        world_id: WorldId,
        query: FeedPageQuery,
    ) -> Result<Vec<FeedItem>, ApiError> {
        Self::send_json(
            self.client
                .get(self.world_url(world_id, "feed"))
                .query(&query),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_world_scoped_urls() {
        let client = SimulationClient::new("http://localhost:3301/");
        let id = WorldId::new();
        assert_eq!(client.url("worlds"), "http://localhost:3301/api/worlds");
        assert_eq!(
            client.world_url(id, ""),
            format!("http://localhost:3301/api/worlds/{id}")
        );
        assert_eq!(
            client.world_url(id, "knowledge-graph"),
            format!("http://localhost:3301/api/worlds/{id}/knowledge-graph")
        );
    }

    #[test]
    fn feed_query_serializes_cursor_verbatim() {
        let client = SimulationClient::default();
        let request = client
            .client
            .get(client.world_url(WorldId::new(), "feed"))
            .query(&FeedPageQuery::before(20, "2026-02-12T10:00:00.000001"))
            .build()
            .expect("request");
        assert_eq!(
            request.url().query(),
            Some("limit=20&before=2026-02-12T10%3A00%3A00.000001")
        );
    }
}

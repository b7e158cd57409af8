//! World Service - fetches worlds and their snapshots into the store
//!
//! Snapshot fetches are best-effort: a failure is logged and the previous
//! snapshot stays visible. Only `create_world` reports errors to the caller,
//! since there is nothing to fall back to.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use nullview_domain::{DomainError, World, WorldId, WorldStatus};
use nullview_shared::{CreateWorldRequest, ListWorldsQuery};

use crate::ports::outbound::{ApiError, SimulationApiPort};
use crate::state::{SnapshotKind, WorldStore};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3_000;

/// Snapshots refreshed alongside every world fetch.
const WORLD_SNAPSHOTS: [SnapshotKind; 4] = [
    SnapshotKind::Agents,
    SnapshotKind::Factions,
    SnapshotKind::Relationships,
    SnapshotKind::WikiPages,
];

#[derive(Debug, thiserror::Error)]
pub enum WorldServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

struct GenerationPoll {
    world_id: WorldId,
    task: JoinHandle<()>,
}

/// Clones share the generation poll, so at most one runs per service.
#[derive(Clone)]
pub struct WorldService {
    api: Arc<dyn SimulationApiPort>,
    store: WorldStore,
    poll_interval: Duration,
    generation_poll: Arc<Mutex<Option<GenerationPoll>>>,
}

impl WorldService {
    pub fn new(api: Arc<dyn SimulationApiPort>, store: WorldStore) -> Self {
        Self {
            api,
            store,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            generation_poll: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Load a world, then refresh its agents, factions, relationships and
    /// wiki pages. A generating world is polled until generation ends.
    pub async fn fetch_world(&self, world_id: WorldId) {
        match self.api.get_world(world_id).await {
            Ok(world) => {
                tracing::info!(%world_id, status = %world.status(), "Loaded world");
                self.store.replace_world(world).await;
            }
            Err(error) => {
                tracing::warn!(%world_id, %error, "Failed to fetch world");
                return;
            }
        }
        self.watch_generation(world_id).await;
        self.refresh_world_snapshots(world_id).await;
    }

    async fn refresh_world_snapshots(&self, world_id: WorldId) {
        let results = join_all(
            WORLD_SNAPSHOTS
                .iter()
                .map(|&kind| async move { (kind, self.store.refresh(kind, world_id).await) }),
        )
        .await;

        for (kind, result) in results {
            if let Err(error) = result {
                tracing::warn!(%world_id, snapshot = %kind, %error, "Snapshot fetch failed");
            }
        }
    }

    async fn fetch_snapshot(&self, kind: SnapshotKind, world_id: WorldId) {
        if let Err(error) = self.store.refresh(kind, world_id).await {
            tracing::warn!(%world_id, snapshot = %kind, %error, "Snapshot fetch failed");
        }
    }

    pub async fn fetch_agents(&self, world_id: WorldId) {
        self.fetch_snapshot(SnapshotKind::Agents, world_id).await;
    }

    pub async fn fetch_factions(&self, world_id: WorldId) {
        self.fetch_snapshot(SnapshotKind::Factions, world_id).await;
    }

    pub async fn fetch_relationships(&self, world_id: WorldId) {
        self.fetch_snapshot(SnapshotKind::Relationships, world_id)
            .await;
    }

    pub async fn fetch_wiki_pages(&self, world_id: WorldId) {
        self.fetch_snapshot(SnapshotKind::WikiPages, world_id).await;
    }

    pub async fn fetch_knowledge_graph(&self, world_id: WorldId) {
        self.fetch_snapshot(SnapshotKind::KnowledgeGraph, world_id)
            .await;
    }

    pub async fn fetch_conversations(&self, world_id: WorldId) {
        self.fetch_snapshot(SnapshotKind::Conversations, world_id)
            .await;
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Replace the world listing, filtered by the current tag.
    pub async fn list_worlds(&self) {
        let query = ListWorldsQuery {
            tag: self.store.tag_filter().await,
        };
        match self.api.list_worlds(query).await {
            Ok(worlds) => {
                tracing::debug!(count = worlds.len(), "Loaded world listing");
                self.store.replace_worlds(worlds).await;
            }
            Err(error) => tracing::warn!(%error, "Failed to list worlds"),
        }
    }

    pub async fn set_tag_filter(&self, tag: Option<String>) {
        self.store.set_tag_filter(tag).await;
        self.list_worlds().await;
    }

    /// Create a world from a seed prompt and refresh the listing.
    pub async fn create_world(&self, seed_prompt: &str) -> Result<World, WorldServiceError> {
        let seed_prompt = seed_prompt.trim();
        if seed_prompt.is_empty() {
            return Err(DomainError::validation("Seed prompt cannot be empty").into());
        }

        let world = self
            .api
            .create_world(CreateWorldRequest::new(seed_prompt))
            .await?;
        tracing::info!(world_id = %world.id(), "Created world");

        self.list_worlds().await;
        Ok(world)
    }

    // =========================================================================
    // Simulation control
    // =========================================================================

    pub async fn start_simulation(&self, world_id: WorldId) {
        match self.api.start_simulation(world_id).await {
            Ok(()) => {
                self.store
                    .set_world_status(world_id, WorldStatus::Running)
                    .await;
            }
            Err(error) => tracing::warn!(%world_id, %error, "Failed to start simulation"),
        }
    }

    pub async fn stop_simulation(&self, world_id: WorldId) {
        match self.api.stop_simulation(world_id).await {
            Ok(()) => {
                self.store
                    .set_world_status(world_id, WorldStatus::Paused)
                    .await;
            }
            Err(error) => tracing::warn!(%world_id, %error, "Failed to stop simulation"),
        }
    }

    // =========================================================================
    // Generation poll
    // =========================================================================

    /// Poll the world while it is generating.
    ///
    /// Returns true if a new poll was started. A poll already running for
    /// `world_id` is kept; one for any other world is aborted. Nothing starts
    /// unless `world_id` is loaded and its view phase polls.
    ///
    /// The poll exits as soon as a fetch reports a status other than
    /// `generating`, after refreshing the world's snapshots once. It also
    /// exits if another world is loaded in the meantime.
    pub async fn watch_generation(&self, world_id: WorldId) -> bool {
        let mut current = self.generation_poll.lock().await;

        if let Some(poll) = current.as_ref() {
            if poll.world_id == world_id && !poll.task.is_finished() {
                return false;
            }
        }
        if let Some(stale) = current.take() {
            if !stale.task.is_finished() {
                tracing::debug!(world_id = %stale.world_id, "Aborting generation poll for previous world");
            }
            stale.task.abort();
        }

        let loaded = self.store.world().await.map(|w| w.id());
        if loaded != Some(world_id) || !self.store.view_phase().await.polls_world() {
            return false;
        }

        tracing::debug!(%world_id, interval_ms = self.poll_interval.as_millis() as u64, "Starting generation poll");
        let task = tokio::spawn(self.clone().poll_generation(world_id));
        *current = Some(GenerationPoll { world_id, task });
        true
    }

    pub async fn is_polling_generation(&self) -> bool {
        self.generation_poll
            .lock()
            .await
            .as_ref()
            .is_some_and(|poll| !poll.task.is_finished())
    }

    pub async fn stop_generation_poll(&self) {
        if let Some(poll) = self.generation_poll.lock().await.take() {
            poll.task.abort();
        }
    }

    async fn poll_generation(self, world_id: WorldId) {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; the world was just fetched.
        interval.tick().await;

        loop {
            interval.tick().await;

            let loaded = self.store.world().await.map(|w| w.id());
            if loaded != Some(world_id) || !self.store.view_phase().await.polls_world() {
                tracing::debug!(%world_id, "Generation poll no longer needed");
                break;
            }

            let world = match self.api.get_world(world_id).await {
                Ok(world) => world,
                Err(error) => {
                    tracing::warn!(%world_id, %error, "Generation poll failed");
                    continue;
                }
            };

            let status = world.status();
            if let Some(progress) = world.genesis_progress() {
                tracing::debug!(%world_id, percent = progress.percent, "Genesis progress");
            }
            self.store.replace_world(world).await;

            if status != WorldStatus::Generating {
                tracing::info!(%world_id, %status, "Generation finished");
                self.refresh_world_snapshots(world_id).await;
                break;
            }
        }
    }
}

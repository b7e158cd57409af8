//! WorldStore - the single owned state container
//!
//! Every piece of observer state lives behind one `tokio::sync::RwLock`.
//! `WorldStore` is a cheap clonable handle; readers get cloned plain data and
//! writers go through the named mutation methods below. The lock is never
//! held across a network await: fetches run first, results are written after.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};

use nullview_domain::{
    Agent, AgentId, Conversation, FactionId, Faction, KnowledgeEdge, Notification,
    NotificationId, Relationship, WikiPage, World, WorldId, WorldListing, WorldStatus,
};
use nullview_shared::{EventEnvelope, EventKind, FeedItem};

use crate::ports::outbound::{ApiError, SimulationApiPort};
use crate::projections::{live_ticker, AgentDirectory, TickerRow, ViewPhase};
use crate::state::event_log::EventLog;
use crate::state::feed_list::{FeedList, PendingPage};
use crate::state::invalidation::{InvalidationHooks, SnapshotKind};
use crate::state::notifications::{NotificationQueue, DEFAULT_HERALD_TTL_MS};

/// Conversations fetched per refresh.
pub const CONVERSATION_PAGE_SIZE: u32 = 50;

/// Envelopes buffered for slow subscribers before they start lagging.
const ENVELOPE_BROADCAST_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct StoreState {
    world: Option<World>,
    view: ViewPhase,
    worlds: Vec<WorldListing>,
    tag_filter: Option<String>,
    agents: Vec<Agent>,
    factions: Vec<Faction>,
    relationships: Vec<Relationship>,
    wiki_pages: Vec<WikiPage>,
    knowledge_graph: Vec<KnowledgeEdge>,
    conversations: Vec<Conversation>,
    events: EventLog,
    feed: FeedList,
    notifications: NotificationQueue,
    selected_faction: Option<FactionId>,
    selected_agent: Option<AgentId>,
}

impl StoreState {
    fn loaded_world_id(&self) -> Option<WorldId> {
        self.world.as_ref().map(World::id)
    }

    /// Drop everything that belongs to the previously loaded world.
    fn reset_world_scope(&mut self) {
        self.view = ViewPhase::Loading;
        self.agents.clear();
        self.factions.clear();
        self.relationships.clear();
        self.wiki_pages.clear();
        self.knowledge_graph.clear();
        self.conversations.clear();
        self.events.clear();
        self.feed.clear();
        self.notifications.clear();
        self.selected_faction = None;
        self.selected_agent = None;
    }
}

/// Cloned, lock-free copy of the store for projections.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub world: Option<World>,
    pub view: ViewPhase,
    pub worlds: Vec<WorldListing>,
    pub tag_filter: Option<String>,
    pub agents: Vec<Agent>,
    pub factions: Vec<Faction>,
    pub relationships: Vec<Relationship>,
    pub wiki_pages: Vec<WikiPage>,
    pub knowledge_graph: Vec<KnowledgeEdge>,
    pub conversations: Vec<Conversation>,
    pub events: Vec<EventEnvelope>,
    pub feed_items: Vec<FeedItem>,
    pub notifications: Vec<Notification>,
    pub selected_faction: Option<FactionId>,
    pub selected_agent: Option<AgentId>,
}

impl WorldSnapshot {
    pub fn directory(&self) -> AgentDirectory<'_> {
        AgentDirectory::new(&self.agents, &self.factions)
    }

    /// Live ticker honouring the selected faction.
    pub fn ticker(&self) -> Vec<TickerRow> {
        live_ticker(&self.events, &self.directory(), self.selected_faction)
    }
}

#[derive(Clone)]
pub struct WorldStore {
    inner: Arc<RwLock<StoreState>>,
    api: Arc<dyn SimulationApiPort>,
    hooks: Arc<InvalidationHooks>,
    herald_ttl: Duration,
    envelopes: broadcast::Sender<EventEnvelope>,
}

impl WorldStore {
    pub fn new(api: Arc<dyn SimulationApiPort>) -> Self {
        let (envelopes, _) = broadcast::channel(ENVELOPE_BROADCAST_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(StoreState::default())),
            api,
            hooks: Arc::new(InvalidationHooks::default()),
            herald_ttl: Duration::from_millis(DEFAULT_HERALD_TTL_MS),
            envelopes,
        }
    }

    pub fn with_herald_ttl(mut self, ttl: Duration) -> Self {
        self.herald_ttl = ttl;
        self
    }

    pub fn with_hooks(mut self, hooks: InvalidationHooks) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    /// Envelopes as they are appended, for consumers that render incrementally.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.envelopes.subscribe()
    }

    // =========================================================================
    // Live stream
    // =========================================================================

    /// Append a live envelope and run its side effects.
    ///
    /// The envelope is stored and the world clock advanced under one write.
    /// Herald banners and snapshot refetches are spawned after the lock is
    /// released; refetches only run while a world is loaded.
    pub async fn append(&self, envelope: EventEnvelope) {
        self.append_checked(None, envelope).await;
    }

    /// Append an envelope streamed for `source`.
    ///
    /// Dropped when a different world is loaded, so a channel that is being
    /// torn down cannot write into its successor's state.
    pub async fn append_from(&self, source: WorldId, envelope: EventEnvelope) -> bool {
        self.append_checked(Some(source), envelope).await
    }

    async fn append_checked(&self, source: Option<WorldId>, envelope: EventEnvelope) -> bool {
        let kind = envelope.kind();
        let loaded = {
            let mut state = self.inner.write().await;
            let loaded = state.loaded_world_id();
            if let (Some(source), Some(loaded)) = (source, loaded) {
                if source != loaded {
                    tracing::debug!(%source, %loaded, "Dropping envelope for a world that is not loaded");
                    return false;
                }
            }
            if let Some(world) = state.world.as_mut() {
                world.apply_live_update(envelope.epoch(), envelope.tick());
            }
            state.events.push(envelope.clone());
            loaded
        };

        if kind == EventKind::HeraldAnnouncement {
            match envelope.text() {
                Some(text) => {
                    self.notify(text).await;
                }
                None => tracing::debug!("Herald announcement without text"),
            }
        }

        if let Some(world_id) = loaded {
            for &target in self.hooks.targets(kind) {
                self.spawn_refresh(target, world_id);
            }
        }

        // No subscribers is fine
        let _ = self.envelopes.send(envelope);
        true
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Show a banner and schedule its removal after the herald TTL.
    pub async fn notify(&self, text: impl Into<String>) -> NotificationId {
        let id = self.inner.write().await.notifications.push(text);

        let store = self.clone();
        let ttl = self.herald_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            store.dismiss_notification(id).await;
        });
        id
    }

    pub async fn dismiss_notification(&self, id: NotificationId) -> bool {
        self.inner.write().await.notifications.dismiss(id)
    }

    // =========================================================================
    // World and listing
    // =========================================================================

    /// Replace the loaded world with a fresh fetch.
    ///
    /// Loading a different world clears every world-scoped snapshot first.
    pub async fn replace_world(&self, world: World) {
        let mut state = self.inner.write().await;
        if state.loaded_world_id().is_some_and(|id| id != world.id()) {
            state.reset_world_scope();
        }
        state.view = state.view.advance(Some(world.status()));
        state.world = Some(world);
    }

    /// Record a status the service acknowledged for `world_id`.
    pub async fn set_world_status(&self, world_id: WorldId, status: WorldStatus) -> bool {
        self.write_if_current(world_id, |state| {
            if let Some(world) = state.world.as_mut() {
                world.set_status(status);
            }
            state.view = state.view.advance(Some(status));
        })
        .await
    }

    pub async fn replace_worlds(&self, worlds: Vec<WorldListing>) {
        self.inner.write().await.worlds = worlds;
    }

    pub async fn set_tag_filter(&self, tag: Option<String>) {
        self.inner.write().await.tag_filter = tag;
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    async fn write_if_current(&self, world_id: WorldId, f: impl FnOnce(&mut StoreState)) -> bool {
        let mut state = self.inner.write().await;
        if state.loaded_world_id() != Some(world_id) {
            tracing::debug!(%world_id, "Dropping snapshot for a world that is not loaded");
            return false;
        }
        f(&mut state);
        true
    }

    pub async fn replace_agents(&self, world_id: WorldId, agents: Vec<Agent>) -> bool {
        self.write_if_current(world_id, |s| s.agents = agents).await
    }

    pub async fn replace_factions(&self, world_id: WorldId, factions: Vec<Faction>) -> bool {
        self.write_if_current(world_id, |s| s.factions = factions).await
    }

    pub async fn replace_relationships(
        &self,
        world_id: WorldId,
        relationships: Vec<Relationship>,
    ) -> bool {
        self.write_if_current(world_id, |s| s.relationships = relationships)
            .await
    }

    pub async fn replace_wiki_pages(&self, world_id: WorldId, pages: Vec<WikiPage>) -> bool {
        self.write_if_current(world_id, |s| s.wiki_pages = pages).await
    }

    pub async fn replace_knowledge_graph(
        &self,
        world_id: WorldId,
        edges: Vec<KnowledgeEdge>,
    ) -> bool {
        self.write_if_current(world_id, |s| s.knowledge_graph = edges)
            .await
    }

    pub async fn replace_conversations(
        &self,
        world_id: WorldId,
        conversations: Vec<Conversation>,
    ) -> bool {
        self.write_if_current(world_id, |s| s.conversations = conversations)
            .await
    }

    /// Refetch one snapshot and store it if `world_id` is still loaded.
    pub async fn refresh(&self, kind: SnapshotKind, world_id: WorldId) -> Result<(), ApiError> {
        tracing::debug!(%world_id, snapshot = %kind, "Refreshing snapshot");
        match kind {
            SnapshotKind::Agents => {
                let agents = self.api.list_agents(world_id).await?;
                self.replace_agents(world_id, agents).await;
            }
            SnapshotKind::Factions => {
                let factions = self.api.list_factions(world_id).await?;
                self.replace_factions(world_id, factions).await;
            }
            SnapshotKind::Relationships => {
                let relationships = self.api.list_relationships(world_id).await?;
                self.replace_relationships(world_id, relationships).await;
            }
            SnapshotKind::WikiPages => {
                let pages = self.api.list_wiki_pages(world_id).await?;
                self.replace_wiki_pages(world_id, pages).await;
            }
            SnapshotKind::KnowledgeGraph => {
                let edges = self.api.knowledge_graph(world_id).await?;
                self.replace_knowledge_graph(world_id, edges).await;
            }
            SnapshotKind::Conversations => {
                let conversations = self
                    .api
                    .list_conversations(world_id, CONVERSATION_PAGE_SIZE)
                    .await?;
                self.replace_conversations(world_id, conversations).await;
            }
        }
        Ok(())
    }

    fn spawn_refresh(&self, kind: SnapshotKind, world_id: WorldId) {
        let store = self.clone();
        tokio::spawn(async move {
            if let Err(error) = store.refresh(kind, world_id).await {
                tracing::warn!(%world_id, snapshot = %kind, %error, "Snapshot refresh failed");
            }
        });
    }

    // =========================================================================
    // Feed pagination
    // =========================================================================

    pub(crate) async fn begin_feed_reload(&self) -> u64 {
        self.inner.write().await.feed.begin_reload()
    }

    pub(crate) async fn finish_feed_reload(&self, generation: u64, items: Vec<FeedItem>) -> bool {
        self.inner.write().await.feed.finish_reload(generation, items)
    }

    pub(crate) async fn begin_feed_more(&self) -> Option<PendingPage> {
        self.inner.write().await.feed.begin_more()
    }

    pub(crate) async fn finish_feed_more(
        &self,
        generation: u64,
        page: Option<Vec<FeedItem>>,
    ) -> bool {
        self.inner.write().await.feed.finish_more(generation, page)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub async fn set_selected_faction(&self, faction_id: Option<FactionId>) {
        self.inner.write().await.selected_faction = faction_id;
    }

    pub async fn set_selected_agent(&self, agent_id: Option<AgentId>) {
        self.inner.write().await.selected_agent = agent_id;
    }

    // =========================================================================
    // Readers
    // =========================================================================

    pub async fn world(&self) -> Option<World> {
        self.inner.read().await.world.clone()
    }

    pub async fn view_phase(&self) -> ViewPhase {
        self.inner.read().await.view
    }

    pub async fn events(&self) -> Vec<EventEnvelope> {
        self.inner.read().await.events.to_vec()
    }

    pub async fn event_count(&self) -> usize {
        self.inner.read().await.events.len()
    }

    pub async fn feed_items(&self) -> Vec<FeedItem> {
        self.inner.read().await.feed.items().to_vec()
    }

    pub async fn is_loading_more(&self) -> bool {
        self.inner.read().await.feed.is_loading_more()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.inner.read().await.notifications.to_vec()
    }

    pub async fn worlds(&self) -> Vec<WorldListing> {
        self.inner.read().await.worlds.clone()
    }

    pub async fn tag_filter(&self) -> Option<String> {
        self.inner.read().await.tag_filter.clone()
    }

    pub async fn snapshot(&self) -> WorldSnapshot {
        let state = self.inner.read().await;
        WorldSnapshot {
            world: state.world.clone(),
            view: state.view,
            worlds: state.worlds.clone(),
            tag_filter: state.tag_filter.clone(),
            agents: state.agents.clone(),
            factions: state.factions.clone(),
            relationships: state.relationships.clone(),
            wiki_pages: state.wiki_pages.clone(),
            knowledge_graph: state.knowledge_graph.clone(),
            conversations: state.conversations.clone(),
            events: state.events.to_vec(),
            feed_items: state.feed.items().to_vec(),
            notifications: state.notifications.to_vec(),
            selected_faction: state.selected_faction,
            selected_agent: state.selected_agent,
        }
    }

    pub async fn ticker(&self) -> Vec<TickerRow> {
        self.snapshot().await.ticker()
    }
}

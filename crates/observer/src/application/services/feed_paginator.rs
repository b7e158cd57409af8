//! Feed Paginator - cursor-based history for the persisted feed
//!
//! The feed list itself lives in the store; this service drives the fetches.
//! `load_initial` starts a new generation, so a `load_more` page that was
//! still in flight is discarded when it lands.

use std::sync::Arc;

use nullview_domain::WorldId;
use nullview_shared::{FeedPageQuery, DEFAULT_FEED_PAGE_SIZE};

use crate::ports::outbound::SimulationApiPort;
use crate::state::WorldStore;

/// What a pagination call did to the feed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page of this many items was stored
    Loaded(usize),
    /// Nothing to do: not visible, empty feed, no cursor, or already loading
    Skipped,
    /// The page arrived after a newer reload and was dropped
    Stale,
    /// The fetch failed; the list is unchanged
    Failed,
}

#[derive(Clone)]
pub struct FeedPaginator {
    api: Arc<dyn SimulationApiPort>,
    store: WorldStore,
    page_size: u32,
}

impl FeedPaginator {
    pub fn new(api: Arc<dyn SimulationApiPort>, store: WorldStore) -> Self {
        Self {
            api,
            store,
            page_size: DEFAULT_FEED_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch the newest page and replace the feed with it.
    pub async fn load_initial(&self, world_id: WorldId) -> LoadOutcome {
        let generation = self.store.begin_feed_reload().await;

        match self
            .api
            .feed_page(world_id, FeedPageQuery::first(self.page_size))
            .await
        {
            Ok(items) => {
                let count = items.len();
                if self.store.finish_feed_reload(generation, items).await {
                    tracing::debug!(%world_id, count, "Loaded first feed page");
                    LoadOutcome::Loaded(count)
                } else {
                    LoadOutcome::Stale
                }
            }
            Err(error) => {
                tracing::warn!(%world_id, %error, "Failed to load feed");
                LoadOutcome::Failed
            }
        }
    }

    /// Fetch the page older than the oldest item held and append it.
    pub async fn load_more(&self, world_id: WorldId) -> LoadOutcome {
        let Some(pending) = self.store.begin_feed_more().await else {
            return LoadOutcome::Skipped;
        };

        let query = FeedPageQuery::before(self.page_size, pending.before);
        match self.api.feed_page(world_id, query).await {
            Ok(items) => {
                let count = items.len();
                if self
                    .store
                    .finish_feed_more(pending.generation, Some(items))
                    .await
                {
                    tracing::debug!(%world_id, count, "Appended older feed page");
                    LoadOutcome::Loaded(count)
                } else {
                    tracing::debug!(%world_id, "Dropping feed page from an older reload");
                    LoadOutcome::Stale
                }
            }
            Err(error) => {
                tracing::warn!(%world_id, %error, "Failed to load more feed items");
                self.store.finish_feed_more(pending.generation, None).await;
                LoadOutcome::Failed
            }
        }
    }

    /// Visibility trigger for the end-of-list sentinel.
    pub async fn sentinel_visible(&self, world_id: WorldId, intersecting: bool) -> LoadOutcome {
        if !intersecting {
            return LoadOutcome::Skipped;
        }
        self.load_more(world_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use nullview_shared::FeedItem;

    use crate::infrastructure::testing::fixtures::{api_request_failed, feed_item};
    use crate::ports::outbound::MockSimulationApiPort;

    fn topics(items: &[FeedItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| {
                item.data
                    .get("topic")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    fn paginator(mock: MockSimulationApiPort) -> (FeedPaginator, WorldStore) {
        let api: Arc<dyn SimulationApiPort> = Arc::new(mock);
        let store = WorldStore::new(Arc::clone(&api));
        (FeedPaginator::new(api, store.clone()), store)
    }

    #[tokio::test]
    async fn more_pages_are_appended_in_server_order() {
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_none() && query.limit == 20)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    feed_item("c", Some("2026-02-12T10:03:00")),
                    feed_item("b", Some("2026-02-12T10:02:00")),
                ])
            });
        mock.expect_feed_page()
            .withf(|_, query| query.before.as_deref() == Some("2026-02-12T10:02:00"))
            .times(1)
            .returning(|_, _| Ok(vec![feed_item("a", Some("2026-02-12T10:01:00"))]));

        let (paginator, store) = paginator(mock);
        let world_id = WorldId::new();

        assert_eq!(paginator.load_initial(world_id).await, LoadOutcome::Loaded(2));
        assert_eq!(paginator.load_more(world_id).await, LoadOutcome::Loaded(1));
        assert_eq!(topics(&store.feed_items().await), vec!["c", "b", "a"]);
        assert!(!store.is_loading_more().await);
    }

    #[tokio::test]
    async fn load_more_on_empty_feed_is_skipped() {
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page().times(0);
        let (paginator, _store) = paginator(mock);
        assert_eq!(paginator.load_more(WorldId::new()).await, LoadOutcome::Skipped);
    }

    #[tokio::test]
    async fn oldest_item_without_timestamp_stops_pagination() {
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![feed_item("undated", None)]));
        let (paginator, _store) = paginator(mock);
        let world_id = WorldId::new();

        paginator.load_initial(world_id).await;
        assert_eq!(paginator.load_more(world_id).await, LoadOutcome::Skipped);
    }

    #[tokio::test]
    async fn hidden_sentinel_does_not_fetch() {
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page().times(0);
        let (paginator, _store) = paginator(mock);
        assert_eq!(
            paginator.sentinel_visible(WorldId::new(), false).await,
            LoadOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn failed_page_can_be_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_none())
            .returning(|_, _| Ok(vec![feed_item("b", Some("2026-02-12T10:02:00"))]));
        let counter = Arc::clone(&calls);
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_some())
            .returning(move |_, _| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(api_request_failed("connection reset"))
                } else {
                    Ok(vec![feed_item("a", Some("2026-02-12T10:01:00"))])
                }
            });

        let (paginator, store) = paginator(mock);
        let world_id = WorldId::new();
        paginator.load_initial(world_id).await;

        assert_eq!(
            paginator.sentinel_visible(world_id, true).await,
            LoadOutcome::Failed
        );
        assert_eq!(topics(&store.feed_items().await), vec!["b"]);
        assert!(!store.is_loading_more().await);

        assert_eq!(
            paginator.sentinel_visible(world_id, true).await,
            LoadOutcome::Loaded(1)
        );
        assert_eq!(topics(&store.feed_items().await), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn trigger_is_suppressed_while_a_page_is_in_flight() {
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![feed_item("b", Some("2026-02-12T10:02:00"))]));
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_some())
            .times(0);
        let (paginator, store) = paginator(mock);
        let world_id = WorldId::new();
        paginator.load_initial(world_id).await;

        let pending = store.begin_feed_more().await.expect("cursor available");
        assert_eq!(
            paginator.sentinel_visible(world_id, true).await,
            LoadOutcome::Skipped
        );
        store.finish_feed_more(pending.generation, None).await;
    }

    #[tokio::test]
    async fn page_from_before_a_reload_is_dropped() {
        let mut mock = MockSimulationApiPort::new();
        mock.expect_feed_page()
            .withf(|_, query| query.before.is_none())
            .times(2)
            .returning(|_, _| Ok(vec![feed_item("fresh", Some("2026-02-12T10:05:00"))]));
        let (paginator, store) = paginator(mock);
        let world_id = WorldId::new();
        paginator.load_initial(world_id).await;

        let pending = store.begin_feed_more().await.expect("cursor available");
        paginator.load_initial(world_id).await;
        let landed = store
            .finish_feed_more(pending.generation, Some(vec![feed_item("old", None)]))
            .await;

        assert!(!landed);
        assert_eq!(topics(&store.feed_items().await), vec!["fresh"]);
    }
}

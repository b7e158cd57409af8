//! Persisted feed list with pagination bookkeeping

use nullview_shared::FeedItem;

/// A `load_more` the list has agreed to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPage {
    pub generation: u64,
    /// `created_at` of the oldest item held when the load started
    pub before: String,
}

/// Feed items, newest first, plus the in-flight flag and a reload generation.
///
/// Every initial load bumps the generation. A page that was requested under
/// an older generation is dropped when it lands.
#[derive(Debug, Clone, Default)]
pub struct FeedList {
    items: Vec<FeedItem>,
    in_flight: bool,
    generation: u64,
}

impl FeedList {
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn is_loading_more(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn begin_reload(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replace the list if no newer reload has started since `generation`.
    pub fn finish_reload(&mut self, generation: u64, items: Vec<FeedItem>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.items = items;
        true
    }

    /// Claim the in-flight slot for the next older page.
    ///
    /// `None` when a load is already running, the list is empty, or the
    /// oldest item has no `created_at` to page from.
    pub fn begin_more(&mut self) -> Option<PendingPage> {
        if self.in_flight {
            return None;
        }
        let before = self.items.last()?.created_at.clone()?;
        self.in_flight = true;
        Some(PendingPage {
            generation: self.generation,
            before,
        })
    }

    /// Release the in-flight slot and append `page` if it is still current.
    /// A failed fetch passes `None`.
    pub fn finish_more(&mut self, generation: u64, page: Option<Vec<FeedItem>>) -> bool {
        self.in_flight = false;
        match page {
            Some(items) if generation == self.generation => {
                self.items.extend(items);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::feed_item;

    fn topics(list: &FeedList) -> Vec<String> {
        list.items()
            .iter()
            .filter_map(|i| i.data.get("topic").and_then(|t| t.as_str()).map(str::to_string))
            .collect()
    }

    #[test]
    fn more_is_suppressed_while_in_flight() {
        let mut list = FeedList::default();
        let generation = list.begin_reload();
        list.finish_reload(generation, vec![feed_item("a", Some("t2")), feed_item("b", Some("t1"))]);

        let pending = list.begin_more().expect("first claim");
        assert_eq!(pending.before, "t1");
        assert!(list.begin_more().is_none());

        list.finish_more(pending.generation, None);
        assert!(!list.is_loading_more());
        assert!(list.begin_more().is_some());
    }

    #[test]
    fn more_needs_a_cursor() {
        let mut list = FeedList::default();
        assert!(list.begin_more().is_none());

        let generation = list.begin_reload();
        list.finish_reload(generation, vec![feed_item("a", None)]);
        assert!(list.begin_more().is_none());
        assert!(!list.is_loading_more());
    }

    #[test]
    fn stale_page_is_dropped_after_reload() {
        let mut list = FeedList::default();
        let first = list.begin_reload();
        list.finish_reload(first, vec![feed_item("old", Some("t1"))]);

        let pending = list.begin_more().expect("claim");
        let second = list.begin_reload();
        list.finish_reload(second, vec![feed_item("fresh", Some("t9"))]);

        assert!(!list.finish_more(pending.generation, Some(vec![feed_item("older", Some("t0"))])));
        assert_eq!(topics(&list), vec!["fresh"]);
        assert!(!list.is_loading_more());
    }

    #[test]
    fn pages_concatenate_in_server_order() {
        let mut list = FeedList::default();
        let generation = list.begin_reload();
        list.finish_reload(generation, vec![feed_item("a", Some("t3")), feed_item("b", Some("t2"))]);
        let pending = list.begin_more().expect("claim");
        list.finish_more(
            pending.generation,
            Some(vec![feed_item("c", Some("t1")), feed_item("b", Some("t2"))]),
        );
        assert_eq!(topics(&list), vec!["a", "b", "c", "b"]);
    }
}

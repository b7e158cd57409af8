//! Herald banner queue
//!
//! Expiry timers live in the store; this queue only holds what is visible.

use nullview_domain::{Notification, NotificationId};

/// Default time a herald banner stays visible.
pub const DEFAULT_HERALD_TTL_MS: u64 = 8_000;

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, text: impl Into<String>) -> NotificationId {
        let notification = Notification::new(text);
        let id = notification.id;
        self.items.push(notification);
        id
    }

    /// Remove a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Notification> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_is_idempotent() {
        let mut queue = NotificationQueue::default();
        let first = queue.push("The tide turns");
        let second = queue.push("A vote is called");

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.to_vec()[0].id, second);
    }

    #[test]
    fn ids_are_unique() {
        let mut queue = NotificationQueue::default();
        let a = queue.push("same");
        let b = queue.push("same");
        assert_ne!(a, b);
    }
}

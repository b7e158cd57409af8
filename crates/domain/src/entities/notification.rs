//! Notification - a transient herald banner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::NotificationId;

/// A banner created from a herald announcement.
///
/// Notifications are client-only; they expire after a fixed time-to-live
/// regardless of user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

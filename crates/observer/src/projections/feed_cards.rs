//! Typed cards for the persisted feed

use nullview_domain::WikiStatus;
use nullview_shared::{FeedItem, FeedPayload};

/// Participant avatars shown on a conversation card before "+N".
pub const CARD_AVATAR_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedCard {
    Conversation {
        topic: String,
        avatars: Vec<String>,
        overflow: usize,
        message_count: u32,
        preview: String,
        timestamp: Option<String>,
    },
    WikiEdit {
        title: String,
        editor: Option<String>,
        status: Option<WikiStatus>,
        timestamp: Option<String>,
    },
    Epoch {
        epoch: u64,
        summary: String,
        theme_count: u32,
    },
    Post {
        author: Option<String>,
        title: Option<String>,
        content: String,
    },
}

/// Card for one feed item, or `None` if its data does not decode.
pub fn feed_card(item: &FeedItem) -> Option<FeedCard> {
    let payload = match item.payload() {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!(kind = ?item.kind, error = %e, "Skipping malformed feed item");
            return None;
        }
    };

    let timestamp = item.created_at.clone();
    Some(match payload {
        FeedPayload::Conversation(c) => {
            let overflow = c.participant_names.len().saturating_sub(CARD_AVATAR_LIMIT);
            FeedCard::Conversation {
                topic: c.topic,
                avatars: c
                    .participant_names
                    .into_iter()
                    .take(CARD_AVATAR_LIMIT)
                    .collect(),
                overflow,
                message_count: c.message_count,
                preview: c.first_message_preview,
                timestamp,
            }
        }
        FeedPayload::WikiEdit(w) => FeedCard::WikiEdit {
            status: w.status(),
            title: w.title,
            editor: w.agent_name,
            timestamp,
        },
        FeedPayload::Epoch(e) => FeedCard::Epoch {
            epoch: e.epoch,
            summary: e.summary,
            theme_count: e.theme_count,
        },
        FeedPayload::Post(p) => FeedCard::Post {
            author: p.agent_name,
            title: p.title,
            content: p.content,
        },
    })
}

pub fn feed_cards(items: &[FeedItem]) -> Vec<FeedCard> {
    items.iter().filter_map(feed_card).collect()
}

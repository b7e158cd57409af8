//! Persisted feed items
//!
//! The feed endpoint merges conversations, wiki edits, epoch summaries and
//! posts into a single newest-first list. Each item carries a loosely typed
//! `data` object; typed views are produced on demand so one malformed item
//! cannot fail a whole page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use nullview_domain::WikiStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedItemKind {
    Conversation,
    WikiEdit,
    Epoch,
    Post,
}

/// One entry of the persisted feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(rename = "type")]
    pub kind: FeedItemKind,
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Server timestamp, kept verbatim so it can be echoed back as a cursor
    #[serde(default)]
    pub created_at: Option<String>,
}

impl FeedItem {
    pub fn new(kind: FeedItemKind, data: Map<String, Value>, created_at: Option<String>) -> Self {
        Self {
            kind,
            data,
            created_at,
        }
    }

    /// Decode `data` according to `kind`.
    pub fn payload(&self) -> Result<FeedPayload, serde_json::Error> {
        let data = Value::Object(self.data.clone());
        Ok(match self.kind {
            FeedItemKind::Conversation => FeedPayload::Conversation(serde_json::from_value(data)?),
            FeedItemKind::WikiEdit => FeedPayload::WikiEdit(serde_json::from_value(data)?),
            FeedItemKind::Epoch => FeedPayload::Epoch(serde_json::from_value(data)?),
            FeedItemKind::Post => FeedPayload::Post(serde_json::from_value(data)?),
        })
    }
}

/// Reads an explicit `null` as the field's default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Typed payload per feed item kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    Conversation(ConversationSummary),
    WikiEdit(WikiEditSummary),
    Epoch(EpochSummary),
    Post(PostSummary),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub topic: String,
    #[serde(default, deserialize_with = "nullable")]
    pub participant_names: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub message_count: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub first_message_preview: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WikiEditSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    /// Raw status; see [`WikiEditSummary::status`]
    #[serde(default, rename = "status", deserialize_with = "nullable")]
    pub raw_status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub version: u32,
}

impl WikiEditSummary {
    pub fn status(&self) -> Option<WikiStatus> {
        self.raw_status.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EpochSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub epoch: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub theme_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
}

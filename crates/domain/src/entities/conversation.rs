//! Conversation entity - a recorded multi-agent exchange

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ConversationId, DEFAULT_FACTION_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationParticipant {
    /// Raw participant id; the service echoes ids it could not resolve
    pub id: String,
    pub name: String,
    #[serde(default = "default_participant_color")]
    pub faction_color: String,
}

fn default_participant_color() -> String {
    DEFAULT_FACTION_COLOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub epoch: u64,
    #[serde(default)]
    pub tick: u64,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub participants: Vec<ConversationParticipant>,
    #[serde(default)]
    pub messages: Vec<Map<String, Value>>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Conversation {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

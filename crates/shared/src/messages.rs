//! Live event stream messages
//!
//! The live channel carries exactly one inbound message type: a JSON-encoded
//! [`EventEnvelope`]. Nothing is sent outbound besides channel open/close.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Event kinds
// =============================================================================

/// Dotted event names the observer knows how to interpret.
///
/// Envelopes keep their raw `type` string; `EventKind` is a classification
/// over it, so unknown names survive a round trip untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AgentState,
    AgentMessage,
    RelationUpdate,
    EpochTransition,
    EventTriggered,
    WikiEdit,
    ConsensusReached,
    HeraldAnnouncement,
    PostCreated,
    Unknown,
}

impl EventKind {
    pub const AGENT_STATE: &'static str = "agent.state";
    pub const AGENT_MESSAGE: &'static str = "agent.message";
    pub const RELATION_UPDATE: &'static str = "relation.update";
    pub const EPOCH_TRANSITION: &'static str = "epoch.transition";
    pub const EVENT_TRIGGERED: &'static str = "event.triggered";
    pub const WIKI_EDIT: &'static str = "wiki.edit";
    pub const CONSENSUS_REACHED: &'static str = "consensus.reached";
    pub const HERALD_ANNOUNCEMENT: &'static str = "herald.announcement";
    pub const POST_CREATED: &'static str = "post.created";

    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            Self::AGENT_STATE => EventKind::AgentState,
            Self::AGENT_MESSAGE => EventKind::AgentMessage,
            Self::RELATION_UPDATE => EventKind::RelationUpdate,
            Self::EPOCH_TRANSITION => EventKind::EpochTransition,
            Self::EVENT_TRIGGERED => EventKind::EventTriggered,
            Self::WIKI_EDIT => EventKind::WikiEdit,
            Self::CONSENSUS_REACHED => EventKind::ConsensusReached,
            Self::HERALD_ANNOUNCEMENT => EventKind::HeraldAnnouncement,
            Self::POST_CREATED => EventKind::PostCreated,
            _ => EventKind::Unknown,
        }
    }

    /// Wire name, or `None` for [`EventKind::Unknown`].
    pub fn as_type(&self) -> Option<&'static str> {
        Some(match self {
            EventKind::AgentState => Self::AGENT_STATE,
            EventKind::AgentMessage => Self::AGENT_MESSAGE,
            EventKind::RelationUpdate => Self::RELATION_UPDATE,
            EventKind::EpochTransition => Self::EPOCH_TRANSITION,
            EventKind::EventTriggered => Self::EVENT_TRIGGERED,
            EventKind::WikiEdit => Self::WIKI_EDIT,
            EventKind::ConsensusReached => Self::CONSENSUS_REACHED,
            EventKind::HeraldAnnouncement => Self::HERALD_ANNOUNCEMENT,
            EventKind::PostCreated => Self::POST_CREATED,
            EventKind::Unknown => return None,
        })
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// A typed, timestamped, epoch-tagged message from the live channel.
///
/// Envelopes are immutable once received: fields are private and only
/// exposed through accessors. Some producers omit `epoch`, in which case it
/// reads as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    timestamp: String,
    #[serde(default)]
    epoch: u64,
    #[serde(default)]
    payload: Map<String, Value>,
}

impl EventEnvelope {
    pub fn new(
        event_type: impl Into<String>,
        timestamp: impl Into<String>,
        epoch: u64,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp: timestamp.into(),
            epoch,
            payload,
        }
    }

    /// Parse a raw text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn kind(&self) -> EventKind {
        EventKind::from_type(&self.event_type)
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// String field from the payload; non-string values read as absent.
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// `payload.tick`, when it is a non-negative integer.
    pub fn tick(&self) -> Option<u64> {
        self.payload.get("tick").and_then(Value::as_u64)
    }

    /// `payload.agent_id` as sent by the producer.
    pub fn agent_id(&self) -> Option<&str> {
        self.payload_str("agent_id")
    }

    /// `payload.text` (herald announcements, some triggered events).
    pub fn text(&self) -> Option<&str> {
        self.payload_str("text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_agent_message_frame() {
        let frame = r#"{
            "type": "agent.message",
            "timestamp": "2026-02-12T10:00:00",
            "epoch": 4,
            "payload": {"agent_id": "a-1", "agent_name": "Ossa", "content": "We sail at dawn", "tick": 17, "round": 2}
        }"#;
        let env = EventEnvelope::from_json(frame).expect("valid frame");
        assert_eq!(env.kind(), EventKind::AgentMessage);
        assert_eq!(env.epoch(), 4);
        assert_eq!(env.tick(), Some(17));
        assert_eq!(env.agent_id(), Some("a-1"));
    }

    #[test]
    fn missing_epoch_reads_as_zero() {
        let env = EventEnvelope::from_json(
            r#"{"type": "wiki.edit", "timestamp": "t", "payload": {"title": "Tides"}}"#,
        )
        .expect("valid frame");
        assert_eq!(env.epoch(), 0);
        assert_eq!(env.kind(), EventKind::WikiEdit);
        assert_eq!(env.tick(), None);
    }

    #[test]
    fn unknown_type_is_kept_verbatim() {
        let env = EventEnvelope::new("weather.shift", "t", 1, Map::new());
        assert_eq!(env.kind(), EventKind::Unknown);
        assert_eq!(env.event_type(), "weather.shift");
        assert_eq!(env.kind().as_type(), None);
    }

    #[test]
    fn non_integer_tick_is_ignored() {
        let payload = json!({"tick": "soon"});
        let env = EventEnvelope::new(
            "event.triggered",
            "t",
            1,
            payload.as_object().cloned().unwrap_or_default(),
        );
        assert_eq!(env.tick(), None);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(EventEnvelope::from_json("{not json").is_err());
        assert!(EventEnvelope::from_json(r#"{"epoch": 1}"#).is_err());
    }
}

//! Simple test fixtures used across unit tests.

use serde_json::{json, Map, Value};

use nullview_domain::{Agent, AgentId, Faction, FactionId, World, WorldId, WorldStatus};
use nullview_shared::{EventEnvelope, FeedItem, FeedItemKind};

use crate::ports::outbound::ApiError;

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

pub fn world(status: WorldStatus) -> World {
    World::new(WorldId::new(), "a drowned archipelago").with_status(status)
}

pub fn envelope(event_type: &str, epoch: u64, payload: Value) -> EventEnvelope {
    EventEnvelope::new(event_type, "2026-02-12T10:00:00", epoch, object(payload))
}

pub fn agent_message(epoch: u64, agent_id: AgentId, content: &str) -> EventEnvelope {
    envelope(
        "agent.message",
        epoch,
        json!({"agent_id": agent_id.to_string(), "agent_name": "Stray", "content": content, "tick": 1, "round": 1}),
    )
}

pub fn herald(epoch: u64, text: &str) -> EventEnvelope {
    envelope("herald.announcement", epoch, json!({"text": text, "event_count": 3}))
}

pub fn agent(world_id: WorldId, name: &str, faction: Option<FactionId>) -> Agent {
    let agent = Agent::new(AgentId::new(), world_id, name);
    match faction {
        Some(faction_id) => agent.with_faction(faction_id),
        None => agent,
    }
}

pub fn faction(world_id: WorldId, name: &str, color: &str) -> Faction {
    Faction::new(FactionId::new(), world_id, name).with_color(color)
}

/// Conversation feed item titled `topic`.
pub fn feed_item(topic: &str, created_at: Option<&str>) -> FeedItem {
    FeedItem::new(
        FeedItemKind::Conversation,
        object(json!({"topic": topic, "participant_names": [], "message_count": 0, "first_message_preview": ""})),
        created_at.map(str::to_string),
    )
}

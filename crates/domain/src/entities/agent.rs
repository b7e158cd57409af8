//! Agent entity - a simulated inhabitant of a world

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{AgentId, FactionId, WorldId};

/// An agent snapshot.
///
/// `persona` and `beliefs` are produced by the simulation's language models
/// and are kept as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub world_id: WorldId,
    #[serde(default)]
    pub faction_id: Option<FactionId>,
    pub name: String,
    #[serde(default)]
    pub persona: Map<String, Value>,
    #[serde(default)]
    pub beliefs: Vec<Value>,
    #[serde(default)]
    pub status: String,
}

impl Agent {
    pub fn new(id: AgentId, world_id: WorldId, name: impl Into<String>) -> Self {
        Self {
            id,
            world_id,
            faction_id: None,
            name: name.into(),
            persona: Map::new(),
            beliefs: Vec::new(),
            status: "idle".to_string(),
        }
    }

    pub fn with_faction(mut self, faction_id: FactionId) -> Self {
        self.faction_id = Some(faction_id);
        self
    }

    pub fn belongs_to(&self, faction_id: FactionId) -> bool {
        self.faction_id == Some(faction_id)
    }

    /// Persona role, when the persona carries one.
    pub fn role(&self) -> Option<&str> {
        self.persona.get("role").and_then(Value::as_str)
    }
}

//! Faction entity

use serde::{Deserialize, Serialize};

use crate::{FactionId, WorldId};

/// Colour used when an agent has no faction or the faction is unknown.
pub const DEFAULT_FACTION_COLOR: &str = "#6366f1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub world_id: WorldId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub agent_count: u32,
}

fn default_color() -> String {
    DEFAULT_FACTION_COLOR.to_string()
}

impl Faction {
    pub fn new(id: FactionId, world_id: WorldId, name: impl Into<String>) -> Self {
        Self {
            id,
            world_id,
            name: name.into(),
            description: String::new(),
            color: default_color(),
            agent_count: 0,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

//! World aggregate - the observed simulation and its coarse clock
//!
//! A `World` is a snapshot entity owned by the Simulation Service. The client
//! replaces it wholesale on every fetch; the only field-level mutation allowed
//! between fetches is the live clock update carried by event envelopes.
//!
//! # Invariants
//!
//! - `current_epoch` never decreases through [`World::apply_live_update`].
//!   Only a fresh fetch may overwrite it with a smaller value.
//! - `current_tick` follows the latest tick reported by the live stream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::{WorldId, DEFAULT_FACTION_COLOR};

/// Key inside the world configuration blob that carries generation progress.
pub const GENESIS_PROGRESS_KEY: &str = "_genesis_progress";

/// Key inside the world configuration blob listing the factions the world
/// was seeded with.
pub const SEED_FACTIONS_KEY: &str = "factions";

/// Lifecycle status reported by the Simulation Service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldStatus {
    Created,
    Generating,
    Running,
    Paused,
    Completed,
    Error,
}

impl WorldStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorldStatus::Created => "created",
            WorldStatus::Generating => "generating",
            WorldStatus::Running => "running",
            WorldStatus::Paused => "paused",
            WorldStatus::Completed => "completed",
            WorldStatus::Error => "error",
        }
    }

    /// Terminal statuses never change again without user action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorldStatus::Completed | WorldStatus::Error)
    }
}

impl std::fmt::Display for WorldStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorldStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "generating" => Ok(Self::Generating),
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "error" => Ok(Self::Error),
            other => Err(DomainError::parse(format!("unknown world status: {other}"))),
        }
    }
}

/// Generation progress published in the world configuration while generating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenesisProgress {
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub step_num: u32,
    #[serde(default)]
    pub total_steps: u32,
}

/// A faction as written into the world configuration at generation time.
///
/// Used before the factions snapshot has been populated. Missing or null
/// values fall back to empty text, the default colour and zero members.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedFaction {
    pub name: String,
    pub description: String,
    pub color: String,
    pub agent_count: u32,
}

impl SeedFaction {
    fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let color = value
            .get("color")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_FACTION_COLOR)
            .to_string();
        let agent_count = value
            .get("agent_count")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);

        Self {
            name: text("name"),
            description: text("description"),
            color,
            agent_count,
        }
    }
}

/// A simulated world as seen by the observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    id: WorldId,
    seed_prompt: String,
    #[serde(default)]
    config: Map<String, Value>,
    status: WorldStatus,
    #[serde(default)]
    current_epoch: u64,
    #[serde(default)]
    current_tick: u64,
    /// Server timestamp, kept verbatim
    #[serde(default)]
    created_at: Option<String>,
}

impl World {
    /// Create a freshly created world with an empty configuration.
    pub fn new(id: WorldId, seed_prompt: impl Into<String>) -> Self {
        Self {
            id,
            seed_prompt: seed_prompt.into(),
            config: Map::new(),
            status: WorldStatus::Created,
            current_epoch: 0,
            current_tick: 0,
            created_at: None,
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_status(mut self, status: WorldStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_clock(mut self, epoch: u64, tick: u64) -> Self {
        self.current_epoch = epoch;
        self.current_tick = tick;
        self
    }

    pub fn with_config(mut self, config: Map<String, Value>) -> Self {
        self.config = config;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn seed_prompt(&self) -> &str {
        &self.seed_prompt
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn status(&self) -> WorldStatus {
        self.status
    }

    pub fn current_epoch(&self) -> u64 {
        self.current_epoch
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    /// Typed view of `config._genesis_progress`, if present and well formed.
    pub fn genesis_progress(&self) -> Option<GenesisProgress> {
        self.config
            .get(GENESIS_PROGRESS_KEY)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Factions listed in `config.factions`, in configuration order.
    pub fn seed_factions(&self) -> Vec<SeedFaction> {
        self.config
            .get(SEED_FACTIONS_KEY)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(SeedFaction::from_value).collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Apply the clock carried by a live envelope.
    ///
    /// The epoch only moves forward. The tick is taken verbatim whenever the
    /// envelope reports one. Returns true if anything changed.
    pub fn apply_live_update(&mut self, epoch: u64, tick: Option<u64>) -> bool {
        let mut changed = false;
        if epoch > self.current_epoch {
            self.current_epoch = epoch;
            changed = true;
        }
        if let Some(tick) = tick {
            if tick != self.current_tick {
                self.current_tick = tick;
                changed = true;
            }
        }
        changed
    }

    /// Record a status the service acknowledged (start/stop commands).
    pub fn set_status(&mut self, status: WorldStatus) {
        self.status = status;
    }
}

/// Weighted tag attached to a world in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldTag {
    pub tag: String,
    #[serde(default)]
    pub weight: f64,
}

/// World as returned by the listing endpoint, with activity counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldListing {
    #[serde(flatten)]
    pub world: World,
    #[serde(default)]
    pub agent_count: Option<u32>,
    #[serde(default)]
    pub conversation_count: Option<u32>,
    #[serde(default)]
    pub wiki_page_count: Option<u32>,
    #[serde(default)]
    pub epoch_count: Option<u32>,
    #[serde(default)]
    pub latest_activity: Option<String>,
    #[serde(default)]
    pub tags: Vec<WorldTag>,
}

impl WorldListing {
    pub fn new(world: World) -> Self {
        Self {
            world,
            agent_count: None,
            conversation_count: None,
            wiki_page_count: None,
            epoch_count: None,
            latest_activity: None,
            tags: Vec::new(),
        }
    }

    /// A world with enough recorded history to browse: at least five
    /// conversations and one wiki page.
    pub fn is_mature(&self) -> bool {
        self.conversation_count.unwrap_or(0) >= 5 && self.wiki_page_count.unwrap_or(0) >= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn world() -> World {
        World::new(WorldId::new(), "a drowned archipelago").with_clock(3, 40)
    }

    #[test]
    fn epoch_only_moves_forward() {
        let mut w = world();
        assert!(w.apply_live_update(5, None));
        assert_eq!(w.current_epoch(), 5);

        assert!(!w.apply_live_update(0, None));
        assert_eq!(w.current_epoch(), 5);
    }

    #[test]
    fn tick_follows_live_value() {
        let mut w = world();
        w.apply_live_update(3, Some(7));
        assert_eq!(w.current_tick(), 7);
        assert_eq!(w.current_epoch(), 3);
    }

    #[test]
    fn deserializes_service_payload() {
        let raw = json!({
            "id": "7f1c2a4e-55b1-4c8e-9b0e-2f0b3c4d5e6f",
            "seed_prompt": "salt empires",
            "config": {"_genesis_progress": {"percent": 40.0, "step_num": 2, "total_steps": 5}},
            "status": "generating",
            "current_epoch": 0,
            "current_tick": 0,
            "created_at": "2026-02-12T10:00:00.123456"
        });
        let w: World = serde_json::from_value(raw).expect("world");
        assert_eq!(w.status(), WorldStatus::Generating);
        let progress = w.genesis_progress().expect("progress");
        assert_eq!(progress.step_num, 2);
        assert_eq!(progress.total_steps, 5);
    }

    #[test]
    fn listing_carries_tags() {
        let raw = json!({
            "id": "7f1c2a4e-55b1-4c8e-9b0e-2f0b3c4d5e6f",
            "seed_prompt": "salt empires",
            "config": {},
            "status": "running",
            "current_epoch": 2,
            "current_tick": 9,
            "created_at": "2026-02-12T10:00:00",
            "conversation_count": 5,
            "wiki_page_count": 0,
            "tags": [{"tag": "maritime", "weight": 0.8}]
        });
        let mut listing: WorldListing = serde_json::from_value(raw).expect("listing");
        assert_eq!(listing.world.current_epoch(), 2);
        assert_eq!(listing.tags[0].tag, "maritime");
        assert!(!listing.is_mature());

        listing.wiki_page_count = Some(1);
        assert!(listing.is_mature());
    }

    #[test]
    fn terminal_statuses() {
        assert!(WorldStatus::Error.is_terminal());
        assert!(WorldStatus::Completed.is_terminal());
        assert!(!WorldStatus::Generating.is_terminal());
        assert_eq!("PAUSED".parse::<WorldStatus>(), Ok(WorldStatus::Paused));
    }

    #[test]
    fn seed_factions_tolerate_sparse_entries() {
        let config = json!({
            "factions": [
                {"name": "Salt Guild", "description": "Merchants", "color": "#22c55e", "agent_count": 4},
                {"name": "Reef Court", "color": null, "agent_count": null},
                {"color": ""}
            ]
        });
        let w = world().with_config(config.as_object().cloned().unwrap_or_default());
        let factions = w.seed_factions();

        assert_eq!(factions.len(), 3);
        assert_eq!(factions[0].agent_count, 4);
        assert_eq!(factions[1].color, DEFAULT_FACTION_COLOR);
        assert_eq!(factions[1].agent_count, 0);
        assert_eq!(factions[2].name, "");
        assert_eq!(factions[2].color, DEFAULT_FACTION_COLOR);
    }

    #[test]
    fn no_seed_factions_without_config_list() {
        assert!(world().seed_factions().is_empty());
    }
}

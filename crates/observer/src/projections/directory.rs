//! Agent and faction lookups shared by the projections

use std::collections::HashMap;

use nullview_domain::{Agent, Faction, FactionId, DEFAULT_FACTION_COLOR};

/// Agents keyed by the id string envelopes carry, plus faction colours.
#[derive(Debug, Clone, Default)]
pub struct AgentDirectory<'a> {
    agents: HashMap<String, &'a Agent>,
    factions: HashMap<FactionId, &'a Faction>,
}

impl<'a> AgentDirectory<'a> {
    pub fn new(agents: &'a [Agent], factions: &'a [Faction]) -> Self {
        Self {
            agents: agents.iter().map(|a| (a.id.to_string(), a)).collect(),
            factions: factions.iter().map(|f| (f.id, f)).collect(),
        }
    }

    pub fn agent(&self, agent_id: &str) -> Option<&'a Agent> {
        self.agents.get(agent_id).copied()
    }

    pub fn faction(&self, faction_id: FactionId) -> Option<&'a Faction> {
        self.factions.get(&faction_id).copied()
    }

    /// Colour of the agent's faction, or the default accent.
    pub fn faction_color(&self, agent_id: &str) -> &'a str {
        self.agent(agent_id)
            .and_then(|a| a.faction_id)
            .and_then(|f| self.faction(f))
            .map(|f| f.color.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_FACTION_COLOR)
    }

    pub fn in_faction(&self, agent_id: &str, faction_id: FactionId) -> bool {
        self.agent(agent_id).is_some_and(|a| a.belongs_to(faction_id))
    }
}

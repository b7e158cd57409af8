//! Relationship entity - a typed, weighted edge between two agents
//!
//! Relationships are undirected for every consumer in the observer:
//! `{a, b}` and `{b, a}` describe the same pair.

use serde::{Deserialize, Serialize};

use crate::{AgentId, DomainError, RelationshipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Ally,
    Rival,
    Neutral,
    Trade,
    Mentor,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Ally => "ally",
            RelationType::Rival => "rival",
            RelationType::Neutral => "neutral",
            RelationType::Trade => "trade",
            RelationType::Mentor => "mentor",
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ally" => Ok(Self::Ally),
            "rival" => Ok(Self::Rival),
            "neutral" => Ok(Self::Neutral),
            "trade" => Ok(Self::Trade),
            "mentor" => Ok(Self::Mentor),
            other => Err(DomainError::parse(format!("unknown relation type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: RelationshipId,
    pub agent_a: AgentId,
    pub agent_b: AgentId,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    /// In `[0, 1]`
    #[serde(default)]
    pub strength: f64,
}

impl Relationship {
    pub fn new(agent_a: AgentId, agent_b: AgentId, relation_type: RelationType) -> Self {
        Self {
            id: RelationshipId::new(),
            agent_a,
            agent_b,
            relation_type,
            strength: 0.5,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength.clamp(0.0, 1.0);
        self
    }

    pub fn involves(&self, agent: AgentId) -> bool {
        self.agent_a == agent || self.agent_b == agent
    }

    /// The other endpoint, if `agent` is one of them.
    pub fn counterpart(&self, agent: AgentId) -> Option<AgentId> {
        if self.agent_a == agent {
            Some(self.agent_b)
        } else if self.agent_b == agent {
            Some(self.agent_a)
        } else {
            None
        }
    }

    /// True when one endpoint satisfies `in_a` and the other satisfies `in_b`.
    pub fn spans(&self, in_a: impl Fn(AgentId) -> bool, in_b: impl Fn(AgentId) -> bool) -> bool {
        (in_a(self.agent_a) && in_b(self.agent_b)) || (in_a(self.agent_b) && in_b(self.agent_a))
    }
}

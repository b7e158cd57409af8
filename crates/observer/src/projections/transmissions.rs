//! Per-agent inspector views

use nullview_domain::{Agent, AgentId, RelationType, Relationship};
use nullview_shared::{EventEnvelope, EventKind};

/// Messages shown in an agent's transmission history.
pub const DEFAULT_TRANSMISSION_COUNT: usize = 8;

/// Relationships shown for one agent.
pub const AGENT_RELATIONSHIP_LIMIT: usize = 10;

/// Last `limit` `agent.message` envelopes sent by `agent_id`, in log order.
pub fn recent_transmissions<'e>(
    events: impl IntoIterator<Item = &'e EventEnvelope>,
    agent_id: AgentId,
    limit: usize,
) -> Vec<&'e EventEnvelope> {
    let wanted = agent_id.to_string();
    let matching: Vec<&EventEnvelope> = events
        .into_iter()
        .filter(|e| e.kind() == EventKind::AgentMessage && e.agent_id() == Some(wanted.as_str()))
        .collect();
    let skip = matching.len().saturating_sub(limit);
    matching.into_iter().skip(skip).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentRelation {
    pub counterpart_id: AgentId,
    /// `None` when the counterpart is missing from the agent snapshot
    pub counterpart_name: Option<String>,
    pub relation_type: RelationType,
    pub strength: f64,
}

/// Relationships involving `agent_id`, capped at `AGENT_RELATIONSHIP_LIMIT`.
pub fn agent_relationships(
    agent_id: AgentId,
    relationships: &[Relationship],
    agents: &[Agent],
) -> Vec<AgentRelation> {
    relationships
        .iter()
        .filter_map(|rel| {
            let counterpart_id = rel.counterpart(agent_id)?;
            Some(AgentRelation {
                counterpart_id,
                counterpart_name: agents
                    .iter()
                    .find(|a| a.id == counterpart_id)
                    .map(|a| a.name.clone()),
                relation_type: rel.relation_type,
                strength: rel.strength,
            })
        })
        .take(AGENT_RELATIONSHIP_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::{agent, agent_message, herald};
    use nullview_domain::WorldId;

    #[test]
    fn keeps_the_most_recent_messages_of_one_agent() {
        let ossa = AgentId::new();
        let brin = AgentId::new();
        let mut events = Vec::new();
        for n in 0..12 {
            events.push(agent_message(1, ossa, &format!("ossa {n}")));
            events.push(agent_message(1, brin, "noise"));
            events.push(herald(1, "herald"));
        }

        let history = recent_transmissions(&events, ossa, DEFAULT_TRANSMISSION_COUNT);
        let contents: Vec<&str> = history
            .iter()
            .filter_map(|e| e.payload_str("content"))
            .collect();
        let expected: Vec<String> = (4..12).map(|n| format!("ossa {n}")).collect();
        assert_eq!(contents, expected);
    }

    #[test]
    fn relationships_resolve_counterparts() {
        let world_id = WorldId::new();
        let ossa = agent(world_id, "Ossa", None);
        let brin = agent(world_id, "Brin", None);
        let ghost = AgentId::new();
        let rels: Vec<Relationship> = (0..12)
            .map(|n| {
                let other = if n == 0 { brin.id } else { ghost };
                Relationship::new(other, ossa.id, RelationType::Mentor)
            })
            .collect();

        let view = agent_relationships(ossa.id, &rels, &[ossa.clone(), brin.clone()]);
        assert_eq!(view.len(), AGENT_RELATIONSHIP_LIMIT);
        assert_eq!(view[0].counterpart_name.as_deref(), Some("Brin"));
        assert_eq!(view[1].counterpart_name, None);
    }
}

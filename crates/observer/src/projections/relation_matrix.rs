//! Faction overview: relation matrix and membership summary

use std::collections::{HashMap, HashSet};

use nullview_domain::{
    Agent, AgentId, Faction, FactionId, RelationType, Relationship, SeedFaction, World,
};

/// Members listed per faction in the overview.
pub const FACTION_MEMBER_PREVIEW: usize = 5;

/// Dominant relation type between each ordered pair of distinct factions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationMatrix {
    cells: HashMap<(FactionId, FactionId), RelationType>,
}

impl RelationMatrix {
    pub fn cell(&self, a: FactionId, b: FactionId) -> Option<RelationType> {
        self.cells.get(&(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn members(agents: &[Agent], faction_id: FactionId) -> HashSet<AgentId> {
    agents
        .iter()
        .filter(|a| a.belongs_to(faction_id))
        .map(|a| a.id)
        .collect()
}

/// Most frequent relation type among relationships spanning one agent of
/// `a` and one of `b`, in either direction.
///
/// Ties go to the type encountered first in `relationships` order. `None`
/// when no relationship spans the pair.
pub fn dominant_relation(
    a: &HashSet<AgentId>,
    b: &HashSet<AgentId>,
    relationships: &[Relationship],
) -> Option<RelationType> {
    let mut counts: Vec<(RelationType, usize)> = Vec::new();
    for rel in relationships
        .iter()
        .filter(|r| r.spans(|id| a.contains(&id), |id| b.contains(&id)))
    {
        match counts.iter_mut().find(|(t, _)| *t == rel.relation_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((rel.relation_type, 1)),
        }
    }

    let mut best: Option<(RelationType, usize)> = None;
    for (relation_type, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((relation_type, count));
        }
    }
    best.map(|(relation_type, _)| relation_type)
}

pub fn relation_matrix(
    factions: &[Faction],
    agents: &[Agent],
    relationships: &[Relationship],
) -> RelationMatrix {
    let memberships: Vec<(FactionId, HashSet<AgentId>)> = factions
        .iter()
        .map(|f| (f.id, members(agents, f.id)))
        .collect();

    let mut cells = HashMap::new();
    for (a, members_a) in &memberships {
        for (b, members_b) in &memberships {
            if a == b {
                continue;
            }
            if let Some(relation_type) = dominant_relation(members_a, members_b, relationships) {
                cells.insert((*a, *b), relation_type);
            }
        }
    }
    RelationMatrix { cells }
}

/// One faction row of the overview sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct FactionSummary {
    /// `None` for factions read from the world configuration
    pub faction_id: Option<FactionId>,
    pub name: String,
    pub color: String,
    /// Share of all agents, in percent
    pub power: f64,
    /// First few members, in snapshot order
    pub members: Vec<AgentId>,
}

fn share(count: u32, total: usize) -> f64 {
    if total > 0 {
        f64::from(count) / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Sidebar rows for the loaded world.
///
/// Falls back to the factions the world was seeded with while the factions
/// snapshot is still empty. Seeded factions carry no id, so their members
/// are an even split of the agent list in snapshot order.
pub fn faction_overview(
    world: Option<&World>,
    factions: &[Faction],
    agents: &[Agent],
) -> Vec<FactionSummary> {
    if factions.is_empty() {
        return seeded_overview(&world.map(World::seed_factions).unwrap_or_default(), agents);
    }

    let counted: u32 = factions.iter().map(|f| f.agent_count).sum();
    let total = if counted > 0 { counted as usize } else { agents.len() };

    factions
        .iter()
        .map(|f| FactionSummary {
            faction_id: Some(f.id),
            name: f.name.clone(),
            color: f.color.clone(),
            power: share(f.agent_count, total),
            members: agents
                .iter()
                .filter(|a| a.belongs_to(f.id))
                .take(FACTION_MEMBER_PREVIEW)
                .map(|a| a.id)
                .collect(),
        })
        .collect()
}

fn seeded_overview(seeds: &[SeedFaction], agents: &[Agent]) -> Vec<FactionSummary> {
    let counted: u32 = seeds.iter().map(|f| f.agent_count).sum();
    let total = if counted > 0 { counted as usize } else { agents.len() };
    let per_faction = agents.len().div_ceil(seeds.len().max(1));

    seeds
        .iter()
        .enumerate()
        .map(|(index, seed)| FactionSummary {
            faction_id: None,
            name: seed.name.clone(),
            color: seed.color.clone(),
            power: share(seed.agent_count, total),
            members: agents
                .iter()
                .skip(index * per_faction)
                .take(per_faction.min(FACTION_MEMBER_PREVIEW))
                .map(|a| a.id)
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures::{agent, faction};
    use nullview_domain::{WorldId, DEFAULT_FACTION_COLOR};
    use serde_json::json;

    struct Setup {
        factions: Vec<Faction>,
        agents: Vec<Agent>,
    }

    fn two_factions() -> Setup {
        let world_id = WorldId::new();
        let guild = faction(world_id, "Salt Guild", "#22c55e");
        let reef = faction(world_id, "Reef Court", "#ef4444");
        let agents = vec![
            agent(world_id, "Ossa", Some(guild.id)),
            agent(world_id, "Tamsin", Some(guild.id)),
            agent(world_id, "Brin", Some(reef.id)),
            agent(world_id, "Corra", Some(reef.id)),
        ];
        Setup {
            factions: vec![guild, reef],
            agents,
        }
    }

    #[test]
    fn majority_type_wins_in_both_directions() {
        let s = two_factions();
        let (guild, reef) = (s.factions[0].id, s.factions[1].id);
        let rels = vec![
            Relationship::new(s.agents[0].id, s.agents[2].id, RelationType::Trade),
            Relationship::new(s.agents[3].id, s.agents[1].id, RelationType::Rival),
            Relationship::new(s.agents[1].id, s.agents[2].id, RelationType::Rival),
            Relationship::new(s.agents[0].id, s.agents[1].id, RelationType::Ally),
        ];
        let matrix = relation_matrix(&s.factions, &s.agents, &rels);
        assert_eq!(matrix.cell(guild, reef), Some(RelationType::Rival));
        assert_eq!(matrix.cell(reef, guild), Some(RelationType::Rival));
        assert_eq!(matrix.cell(guild, guild), None);
    }

    #[test]
    fn tie_never_invents_a_type() {
        let s = two_factions();
        let (guild, reef) = (s.factions[0].id, s.factions[1].id);
        let rels = vec![
            Relationship::new(s.agents[0].id, s.agents[2].id, RelationType::Ally),
            Relationship::new(s.agents[1].id, s.agents[3].id, RelationType::Rival),
            Relationship::new(s.agents[0].id, s.agents[3].id, RelationType::Ally),
            Relationship::new(s.agents[1].id, s.agents[2].id, RelationType::Rival),
        ];
        let cell = relation_matrix(&s.factions, &s.agents, &rels).cell(guild, reef);
        assert!(matches!(cell, Some(RelationType::Ally) | Some(RelationType::Rival)));
        assert_eq!(cell, Some(RelationType::Ally));
    }

    #[test]
    fn no_cell_without_spanning_relationships() {
        let s = two_factions();
        let rels = vec![Relationship::new(s.agents[0].id, s.agents[1].id, RelationType::Mentor)];
        assert!(relation_matrix(&s.factions, &s.agents, &rels).is_empty());
    }

    #[test]
    fn overview_uses_agent_counts() {
        let mut s = two_factions();
        s.factions[0].agent_count = 3;
        s.factions[1].agent_count = 1;
        let overview = faction_overview(None, &s.factions, &s.agents);
        assert_eq!(overview[0].power, 75.0);
        assert_eq!(overview[1].power, 25.0);
        assert_eq!(overview[0].members.len(), 2);
        assert_eq!(overview[0].faction_id, Some(s.factions[0].id));
    }

    fn seeded_world(world_id: WorldId) -> World {
        let config = json!({
            "factions": [
                {"name": "Salt Guild", "color": "#22c55e", "agent_count": 3},
                {"name": "Reef Court", "color": null, "agent_count": 1}
            ]
        });
        World::new(world_id, "a drowned archipelago")
            .with_config(config.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn overview_falls_back_to_seeded_factions() {
        let world_id = WorldId::new();
        let world = seeded_world(world_id);
        let agents: Vec<Agent> = ["Ossa", "Tamsin", "Brin"]
            .into_iter()
            .map(|name| agent(world_id, name, None))
            .collect();

        let overview = faction_overview(Some(&world), &[], &agents);

        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].faction_id, None);
        assert_eq!(overview[0].name, "Salt Guild");
        assert_eq!(overview[0].power, 75.0);
        assert_eq!(overview[1].color, DEFAULT_FACTION_COLOR);
        assert_eq!(overview[0].members, vec![agents[0].id, agents[1].id]);
        assert_eq!(overview[1].members, vec![agents[2].id]);
    }

    #[test]
    fn seeded_factions_ignored_once_snapshot_arrives() {
        let s = two_factions();
        let world = seeded_world(WorldId::new());
        let overview = faction_overview(Some(&world), &s.factions, &s.agents);
        assert!(overview.iter().all(|row| row.faction_id.is_some()));
        assert_eq!(overview[1].name, "Reef Court");
    }

    #[test]
    fn no_overview_without_factions_or_seeds() {
        assert!(faction_overview(None, &[], &[]).is_empty());
    }
}

//! Envelope-driven snapshot invalidation
//!
//! Some envelopes mean a snapshot on the Simulation Service changed. The hook
//! table maps envelope kinds to the snapshots that must be refetched; the
//! store runs them after an append, fire-and-forget.

use std::collections::HashMap;

use nullview_shared::EventKind;

/// A snapshot the store can refetch wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    Agents,
    Factions,
    Relationships,
    WikiPages,
    KnowledgeGraph,
    Conversations,
}

impl SnapshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKind::Agents => "agents",
            SnapshotKind::Factions => "factions",
            SnapshotKind::Relationships => "relationships",
            SnapshotKind::WikiPages => "wiki_pages",
            SnapshotKind::KnowledgeGraph => "knowledge_graph",
            SnapshotKind::Conversations => "conversations",
        }
    }
}

impl std::fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct InvalidationHooks {
    table: HashMap<EventKind, Vec<SnapshotKind>>,
}

impl Default for InvalidationHooks {
    fn default() -> Self {
        Self::empty()
            .on(EventKind::WikiEdit, &[SnapshotKind::WikiPages])
            .on(
                EventKind::EpochTransition,
                &[SnapshotKind::KnowledgeGraph, SnapshotKind::WikiPages],
            )
            .on(EventKind::RelationUpdate, &[SnapshotKind::Relationships])
    }
}

impl InvalidationHooks {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register `targets` for `kind`, replacing any previous entry.
    pub fn on(mut self, kind: EventKind, targets: &[SnapshotKind]) -> Self {
        self.table.insert(kind, targets.to_vec());
        self
    }

    pub fn targets(&self, kind: EventKind) -> &[SnapshotKind] {
        self.table.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let hooks = InvalidationHooks::default();
        assert_eq!(hooks.targets(EventKind::WikiEdit), &[SnapshotKind::WikiPages]);
        assert_eq!(
            hooks.targets(EventKind::EpochTransition),
            &[SnapshotKind::KnowledgeGraph, SnapshotKind::WikiPages]
        );
        assert_eq!(hooks.targets(EventKind::RelationUpdate), &[SnapshotKind::Relationships]);
        assert!(hooks.targets(EventKind::AgentMessage).is_empty());
        assert!(hooks.targets(EventKind::Unknown).is_empty());
    }
}

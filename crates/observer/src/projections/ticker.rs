//! Live ticker rows derived from the event log

use nullview_domain::FactionId;
use nullview_shared::{EventEnvelope, EventKind};

use super::directory::AgentDirectory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerRowKind {
    EpochSeparator,
    Message {
        agent_id: Option<String>,
        agent_name: String,
        faction_color: String,
    },
    Event,
    Herald,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerRow {
    pub kind: TickerRowKind,
    pub epoch: u64,
    pub timestamp: String,
    pub text: String,
}

impl TickerRow {
    pub fn is_message(&self) -> bool {
        matches!(self.kind, TickerRowKind::Message { .. })
    }

    fn message_agent(&self) -> Option<&str> {
        match &self.kind {
            TickerRowKind::Message { agent_id, .. } => agent_id.as_deref(),
            _ => None,
        }
    }
}

/// Incremental ticker: feed envelopes in delivery order, get rows back.
///
/// A separator is emitted whenever an envelope's epoch differs from the
/// previous envelope's, including envelopes that render no row themselves.
#[derive(Debug, Clone, Default)]
pub struct TickerBuilder {
    last_epoch: Option<u64>,
}

impl TickerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, envelope: &EventEnvelope, directory: &AgentDirectory<'_>) -> Vec<TickerRow> {
        let mut rows = Vec::with_capacity(2);
        let epoch = envelope.epoch();
        if self.last_epoch.is_some_and(|last| last != epoch) {
            rows.push(TickerRow {
                kind: TickerRowKind::EpochSeparator,
                epoch,
                timestamp: envelope.timestamp().to_string(),
                text: format!("EPOCH {epoch}"),
            });
        }
        self.last_epoch = Some(epoch);

        if let Some(row) = row_for(envelope, directory) {
            rows.push(row);
        }
        rows
    }
}

fn row_for(envelope: &EventEnvelope, directory: &AgentDirectory<'_>) -> Option<TickerRow> {
    let (kind, text) = match envelope.kind() {
        EventKind::AgentMessage => {
            let agent_id = envelope.agent_id();
            let agent_name = agent_id
                .and_then(|id| directory.agent(id))
                .map(|a| a.name.clone())
                .or_else(|| envelope.payload_str("agent_name").map(str::to_string))
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());
            let faction_color = directory.faction_color(agent_id.unwrap_or_default()).to_string();
            (
                TickerRowKind::Message {
                    agent_id: agent_id.map(str::to_string),
                    agent_name,
                    faction_color,
                },
                envelope.payload_str("content").unwrap_or_default().to_string(),
            )
        }
        EventKind::EventTriggered => (
            TickerRowKind::Event,
            first_non_empty(&[envelope.payload_str("description"), envelope.text()])
                .unwrap_or("Event occurred")
                .to_string(),
        ),
        EventKind::HeraldAnnouncement => (
            TickerRowKind::Herald,
            envelope.text().unwrap_or_default().to_string(),
        ),
        EventKind::ConsensusReached => (
            TickerRowKind::Event,
            format!(
                "CONSENSUS: {}",
                first_non_empty(&[envelope.payload_str("claim")]).unwrap_or("Agreement reached")
            ),
        ),
        _ => return None,
    };

    Some(TickerRow {
        kind,
        epoch: envelope.epoch(),
        timestamp: envelope.timestamp().to_string(),
        text,
    })
}

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates.iter().flatten().copied().find(|s| !s.is_empty())
}

/// Full ticker over `events`.
///
/// With a faction selected, message rows from agents outside it are dropped;
/// separators and non-message rows always stay.
pub fn live_ticker<'e>(
    events: impl IntoIterator<Item = &'e EventEnvelope>,
    directory: &AgentDirectory<'_>,
    faction: Option<FactionId>,
) -> Vec<TickerRow> {
    let mut builder = TickerBuilder::new();
    events
        .into_iter()
        .flat_map(|envelope| builder.push(envelope, directory))
        .filter(|row| keeps(row, directory, faction))
        .collect()
}

/// Faction filter for a single row.
pub fn keeps(row: &TickerRow, directory: &AgentDirectory<'_>, faction: Option<FactionId>) -> bool {
    match faction {
        None => true,
        Some(_) if !row.is_message() => true,
        Some(faction_id) => row
            .message_agent()
            .is_some_and(|agent_id| directory.in_faction(agent_id, faction_id)),
    }
}

//! Rolling log of live envelopes

use std::collections::VecDeque;

use nullview_shared::EventEnvelope;

/// Number of envelopes kept before the oldest is evicted.
pub const EVENT_LOG_CAPACITY: usize = 500;

/// Capacity-bounded envelope log in delivery order.
///
/// The log holds at most `capacity + 1` entries: on append the log is first
/// trimmed to its newest `capacity` entries, then the new envelope is pushed.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<EventEnvelope>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, envelope: EventEnvelope) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(envelope);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventEnvelope> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<EventEnvelope> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn numbered(n: u64) -> EventEnvelope {
        EventEnvelope::new("agent.state", format!("t{n}"), n, Map::new())
    }

    #[test]
    fn stabilizes_one_past_capacity() {
        let mut log = EventLog::default();
        for n in 0..750 {
            log.push(numbered(n));
        }
        assert_eq!(log.len(), EVENT_LOG_CAPACITY + 1);

        let epochs: Vec<u64> = log.iter().map(EventEnvelope::epoch).collect();
        let expected: Vec<u64> = (249..750).collect();
        assert_eq!(epochs, expected);
    }

    #[test]
    fn keeps_everything_below_capacity() {
        let mut log = EventLog::with_capacity(3);
        log.push(numbered(1));
        log.push(numbered(2));
        assert_eq!(log.len(), 2);

        for n in 3..=6 {
            log.push(numbered(n));
        }
        let epochs: Vec<u64> = log.iter().map(EventEnvelope::epoch).collect();
        assert_eq!(epochs, vec![3, 4, 5, 6]);
    }
}

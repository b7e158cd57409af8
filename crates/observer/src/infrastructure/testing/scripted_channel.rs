//! Scripted implementation of LiveChannelPort for testing

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use nullview_domain::WorldId;

use crate::ports::outbound::{ChannelError, LiveChannel, LiveChannelPort};

#[derive(Default)]
struct State {
    opened: Vec<WorldId>,
    current: Option<mpsc::Sender<String>>,
    failures_remaining: u32,
}

/// Live channel whose frames and closes are driven by the test.
///
/// Every `open` is recorded. The most recently opened channel is "current":
/// `push` delivers to it and `close_current` closes it from the server side.
#[derive(Clone, Default)]
pub struct ScriptedLiveChannel {
    state: Arc<Mutex<State>>,
}

impl ScriptedLiveChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().expect("scripted channel state");
        f(&mut state)
    }

    /// Make the next `n` opens fail with a connect error.
    pub fn fail_next_opens(&self, n: u32) {
        self.with_state(|s| s.failures_remaining = n);
    }

    pub fn open_count(&self) -> usize {
        self.with_state(|s| s.opened.len())
    }

    pub fn opened_worlds(&self) -> Vec<WorldId> {
        self.with_state(|s| s.opened.clone())
    }

    /// Deliver a frame on the current channel. Returns false if there is none
    /// or its consumer is gone.
    pub async fn push(&self, frame: impl Into<String>) -> bool {
        let Some(tx) = self.with_state(|s| s.current.clone()) else {
            return false;
        };
        tx.send(frame.into()).await.is_ok()
    }

    /// Server-side close of the current channel.
    pub fn close_current(&self) {
        self.with_state(|s| s.current = None);
    }

    /// True once the consumer of the current channel has dropped it.
    pub fn current_released(&self) -> bool {
        self.with_state(|s| s.current.as_ref().is_none_or(|tx| tx.is_closed()))
    }
}

#[async_trait]
impl LiveChannelPort for ScriptedLiveChannel {
    async fn open(&self, world_id: WorldId) -> Result<LiveChannel, ChannelError> {
        self.with_state(|s| {
            s.opened.push(world_id);
            if s.failures_remaining > 0 {
                s.failures_remaining -= 1;
                s.current = None;
                return Err(ChannelError::Connect("connection refused".to_string()));
            }
            let (tx, rx) = mpsc::channel(64);
            s.current = Some(tx);
            Ok(LiveChannel::new(rx))
        })
    }
}

//! Connection Manager - keeps one live channel open for the selected world
//!
//! A session task owns the channel: it pumps frames into the store, and when
//! the channel closes it waits out the reconnect policy's delay and opens a
//! new one. `disconnect` aborts the task, which drops the channel and
//! cancels any pending reconnect in one step. Dropping the manager does the
//! same.
//!
//! Abort is not pre-emptive, so each session also carries a `SessionToken`
//! and the world id it streams for. Once replaced, a session can no longer
//! publish state, and the store drops envelopes tagged with a world other
//! than the loaded one.

use std::sync::Arc;

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;

use nullview_domain::WorldId;
use nullview_shared::EventEnvelope;

use crate::infrastructure::messaging::{
    ConnectionCell, ConnectionState, ConnectionStateObserver, SessionToken,
};
use crate::infrastructure::websocket::{FixedDelay, ReconnectPolicy};
use crate::ports::outbound::LiveChannelPort;
use crate::state::WorldStore;

struct Session {
    world_id: WorldId,
    wake: Arc<Notify>,
    task: JoinHandle<()>,
}

pub struct ConnectionManager {
    channel: Arc<dyn LiveChannelPort>,
    store: WorldStore,
    policy: Arc<dyn ReconnectPolicy>,
    state: Arc<ConnectionCell>,
    session: Mutex<Option<Session>>,
}

impl ConnectionManager {
    pub fn new(channel: Arc<dyn LiveChannelPort>, store: WorldStore) -> Self {
        Self {
            channel,
            store,
            policy: Arc::new(FixedDelay::default()),
            state: Arc::new(ConnectionCell::new()),
            session: Mutex::new(None),
        }
    }

    pub fn with_policy(mut self, policy: impl ReconnectPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn observer(&self) -> ConnectionStateObserver {
        ConnectionStateObserver::new(Arc::clone(&self.state))
    }

    pub fn state(&self) -> ConnectionState {
        self.state.state()
    }

    pub async fn current_world(&self) -> Option<WorldId> {
        self.session.lock().await.as_ref().map(|s| s.world_id)
    }

    /// Open the live channel for `world_id`.
    ///
    /// - Same world, channel open or opening: no-op.
    /// - Same world, waiting to reconnect: the wait is cut short.
    /// - Different world: the current channel and any pending reconnect are
    ///   dropped before the new channel opens.
    pub async fn connect(&self, world_id: WorldId) {
        let mut session = self.session.lock().await;

        if let Some(current) = session.as_ref() {
            if current.world_id == world_id && !current.task.is_finished() {
                if self.state() == ConnectionState::Reconnecting {
                    tracing::debug!(%world_id, "Reconnecting now instead of waiting");
                    current.wake.notify_waiters();
                }
                return;
            }
        }

        if let Some(previous) = session.take() {
            if previous.world_id != world_id {
                tracing::info!(from = %previous.world_id, to = %world_id, "Switching live channel");
            }
            previous.task.abort();
        }

        let token = self.state.begin_session(ConnectionState::Connecting);
        let wake = Arc::new(Notify::new());
        let ctx = SessionContext {
            world_id,
            token,
            channel: Arc::clone(&self.channel),
            store: self.store.clone(),
            policy: Arc::clone(&self.policy),
            state: Arc::clone(&self.state),
            wake: Arc::clone(&wake),
        };
        let task = tokio::spawn(run_session(ctx));

        *session = Some(Session {
            world_id,
            wake,
            task,
        });
    }

    /// Close the channel and cancel any pending reconnect.
    pub async fn disconnect(&self) {
        let session = self.session.lock().await.take();
        self.state.begin_session(ConnectionState::Disconnected);
        if let Some(session) = session {
            tracing::info!(world_id = %session.world_id, "Disconnecting live channel");
            session.task.abort();
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            tracing::debug!(world_id = %session.world_id, "Connection manager dropped, closing live channel");
            self.state.begin_session(ConnectionState::Disconnected);
            session.task.abort();
        }
    }
}

struct SessionContext {
    world_id: WorldId,
    token: SessionToken,
    channel: Arc<dyn LiveChannelPort>,
    store: WorldStore,
    policy: Arc<dyn ReconnectPolicy>,
    state: Arc<ConnectionCell>,
    wake: Arc<Notify>,
}

impl SessionContext {
    /// Publish `state`; false once this session has been replaced.
    fn publish(&self, state: ConnectionState) -> bool {
        self.state.set(self.token, state)
    }
}

async fn run_session(ctx: SessionContext) {
    let world_id = ctx.world_id;
    // attempts since the last successful open
    let mut attempt: u32 = 0;

    loop {
        if !ctx.publish(ConnectionState::Connecting) {
            return;
        }
        match ctx.channel.open(world_id).await {
            Ok(mut live) => {
                attempt = 0;
                if !ctx.publish(ConnectionState::Connected) {
                    return;
                }
                tracing::info!(%world_id, "Live channel connected");

                while let Some(frame) = live.recv().await {
                    match EventEnvelope::from_json(&frame) {
                        Ok(envelope) => {
                            tracing::trace!(%world_id, event_type = envelope.event_type(), "Envelope received");
                            ctx.store.append_from(world_id, envelope).await;
                        }
                        Err(e) => {
                            tracing::debug!(%world_id, error = %e, "Dropping malformed frame");
                        }
                    }
                }
                tracing::info!(%world_id, "Live channel closed");
            }
            Err(error) => {
                tracing::warn!(%world_id, %error, "Live channel failed to open");
            }
        }

        attempt = attempt.saturating_add(1);
        let Some(delay) = ctx.policy.delay_for(attempt) else {
            tracing::error!(%world_id, attempt, "Reconnect policy gave up");
            ctx.publish(ConnectionState::Failed);
            return;
        };

        let wake = ctx.wake.notified();
        tokio::pin!(wake);
        wake.as_mut().enable();
        if !ctx.publish(ConnectionState::Reconnecting) {
            return;
        }
        tracing::info!(
            %world_id,
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Scheduling reconnect"
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = &mut wake => {
                tracing::debug!(%world_id, "Reconnect wait cut short");
            }
        }
    }
}

//! Live channel lifecycle state
//!
//! One `AtomicU64` packs the current session token (upper bits) with the
//! `ConnectionState` (low byte). A session task may only write while its
//! token is current, so an aborted session that is still mid-poll cannot
//! overwrite the state of the session that replaced it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// Idle until the next `connect`
    Disconnected = 0,
    Connecting = 1,
    /// Frames are flowing
    Connected = 2,
    /// Between a close and the next open attempt
    Reconnecting = 3,
    /// The reconnect policy ran out of attempts
    Failed = 4,
}

const BY_DISCRIMINANT: [ConnectionState; 5] = [
    ConnectionState::Disconnected,
    ConnectionState::Connecting,
    ConnectionState::Connected,
    ConnectionState::Reconnecting,
    ConnectionState::Failed,
];

impl ConnectionState {
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Unknown values read as `Disconnected`.
    pub fn from_u8(raw: u8) -> Self {
        BY_DISCRIMINANT
            .get(usize::from(raw))
            .copied()
            .unwrap_or(ConnectionState::Disconnected)
    }

    /// True while the manager owns a session for some world.
    pub fn has_session(self) -> bool {
        matches!(
            self,
            ConnectionState::Connecting | ConnectionState::Connected | ConnectionState::Reconnecting
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one session's right to write the shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(u64);

fn pack(token: u64, state: ConnectionState) -> u64 {
    (token << 8) | u64::from(state.to_u8())
}

fn unpack(raw: u64) -> (u64, ConnectionState) {
    (raw >> 8, ConnectionState::from_u8((raw & 0xff) as u8))
}

/// Shared connection state, written by the manager and its current session.
#[derive(Debug, Default)]
pub struct ConnectionCell(AtomicU64);

impl ConnectionCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        unpack(self.0.load(Ordering::Acquire)).1
    }

    /// Invalidate the current session and publish `state`.
    ///
    /// Returns the token of the new session.
    pub fn begin_session(&self, state: ConnectionState) -> SessionToken {
        let mut raw = self.0.load(Ordering::Acquire);
        loop {
            let (token, previous) = unpack(raw);
            let next = token.wrapping_add(1) & (u64::MAX >> 8);
            match self.0.compare_exchange_weak(
                raw,
                pack(next, state),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    tracing::trace!(from = %previous, to = %state, session = next, "Connection session started");
                    return SessionToken(next);
                }
                Err(actual) => raw = actual,
            }
        }
    }

    /// Publish `state` on behalf of `session`; ignored once it is stale.
    pub fn set(&self, session: SessionToken, state: ConnectionState) -> bool {
        let mut raw = self.0.load(Ordering::Acquire);
        loop {
            let (token, previous) = unpack(raw);
            if token != session.0 {
                return false;
            }
            match self.0.compare_exchange_weak(
                raw,
                pack(token, state),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if previous != state {
                        tracing::trace!(from = %previous, to = %state, "Connection state changed");
                    }
                    return true;
                }
                Err(actual) => raw = actual,
            }
        }
    }
}

/// Cloneable read-only handle on a connection manager's state.
#[derive(Debug, Clone)]
pub struct ConnectionStateObserver(Arc<ConnectionCell>);

impl ConnectionStateObserver {
    pub fn new(cell: Arc<ConnectionCell>) -> Self {
        Self(cell)
    }

    pub fn state(&self) -> ConnectionState {
        self.0.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}

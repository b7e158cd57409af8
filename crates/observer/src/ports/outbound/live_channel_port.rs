//! Live channel port - per-world inbound event stream
//!
//! A `LiveChannel` yields raw text frames until the underlying transport
//! closes. Dropping it closes the transport. Reconnection is not the
//! adapter's concern; the connection manager decides when to reopen.

use async_trait::async_trait;
use tokio::sync::mpsc;

use nullview_domain::WorldId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to open live channel: {0}")]
    Connect(String),
    #[error("Live channel transport error: {0}")]
    Transport(String),
}

/// Receiving half of an open live channel.
#[derive(Debug)]
pub struct LiveChannel {
    frames: mpsc::Receiver<String>,
}

impl LiveChannel {
    pub fn new(frames: mpsc::Receiver<String>) -> Self {
        Self { frames }
    }

    /// Next text frame, or `None` once the channel has closed.
    pub async fn recv(&mut self) -> Option<String> {
        self.frames.recv().await
    }
}

#[async_trait]
pub trait LiveChannelPort: Send + Sync {
    async fn open(&self, world_id: WorldId) -> Result<LiveChannel, ChannelError>;
}

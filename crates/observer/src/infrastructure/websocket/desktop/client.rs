//! Live channel over tokio-tungstenite

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use nullview_domain::WorldId;

use crate::infrastructure::websocket::shared::{live_endpoint, LIVE_FRAME_BUFFER};
use crate::ports::outbound::{ChannelError, LiveChannel, LiveChannelPort};

/// Opens `{ws_base}/ws/{world_id}` and pumps inbound text frames.
///
/// Each open spawns one pump task that owns the socket. The task ends, and
/// the socket is closed, when the server closes, on a transport error, or
/// once the returned `LiveChannel` is dropped.
#[derive(Debug, Clone)]
pub struct TungsteniteLiveChannel {
    ws_base: String,
}

impl TungsteniteLiveChannel {
    pub fn new(ws_base: impl Into<String>) -> Self {
        Self {
            ws_base: ws_base.into(),
        }
    }
}

#[async_trait]
impl LiveChannelPort for TungsteniteLiveChannel {
    async fn open(&self, world_id: WorldId) -> Result<LiveChannel, ChannelError> {
        let url = live_endpoint(&self.ws_base, world_id);
        let (ws_stream, _) = connect_async(&url)
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        tracing::info!(%world_id, %url, "Live channel open");

        let (mut write, mut read) = ws_stream.split();
        let (tx, rx) = mpsc::channel::<String>(LIVE_FRAME_BUFFER);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => {
                        tracing::debug!(%world_id, "Live channel released, closing socket");
                        if let Err(e) = write.send(Message::Close(None)).await {
                            tracing::debug!(%world_id, error = %e, "Close frame not sent");
                        }
                        break;
                    }
                    frame = read.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            if tx.send(text).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) => {
                            tracing::info!(%world_id, "Server closed live channel");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            let error = ChannelError::Transport(e.to_string());
                            tracing::warn!(%world_id, %error, "Live channel failed");
                            break;
                        }
                        None => break,
                    }
                }
            }
        });

        Ok(LiveChannel::new(rx))
    }
}

//! WebSocket live channel
//!
//! - `desktop`: tokio-tungstenite based channel adapter
//! - `core`: reconnection policies shared by every channel consumer

mod core;
mod desktop;
mod shared;

pub use self::core::{ExponentialBackoff, FixedDelay, ReconnectPolicy};
pub use desktop::TungsteniteLiveChannel;
pub use shared::{live_endpoint, DEFAULT_RECONNECT_DELAY_MS};

//! Shared constants and helpers for the live channel.

use nullview_domain::WorldId;

/// Fixed delay between a close and the single reconnect attempt it schedules.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3_000;

// Exponential backoff constants
pub const INITIAL_RETRY_DELAY_MS: u64 = 1_000;
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;
pub const MAX_RETRY_ATTEMPTS: u32 = 10;
pub const BACKOFF_MULTIPLIER: f64 = 2.0;

/// Frames buffered between the socket pump and the consumer.
pub const LIVE_FRAME_BUFFER: usize = 64;

/// `{ws_base}/ws/{world_id}`
pub fn live_endpoint(ws_base: &str, world_id: WorldId) -> String {
    format!("{}/ws/{}", ws_base.trim_end_matches('/'), world_id)
}

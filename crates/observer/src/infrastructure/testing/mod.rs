//! Test-only infrastructure fakes.
//!
//! These helpers implement outbound ports for unit tests, allowing service
//! tests to run without real network or websocket connections. The HTTP port
//! is mocked with `mockall` directly; the live channel needs a scripted fake
//! because tests drive frames and closes by hand.

pub mod fixtures;
pub mod scripted_channel;

pub use scripted_channel::ScriptedLiveChannel;

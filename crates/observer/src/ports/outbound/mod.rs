//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the Simulation Service and the
//! live event source without depending on concrete transports.

pub mod api_port;
pub mod live_channel_port;

pub use api_port::{ApiError, SimulationApiPort};
pub use live_channel_port::{ChannelError, LiveChannel, LiveChannelPort};

#[cfg(test)]
pub use api_port::MockSimulationApiPort;

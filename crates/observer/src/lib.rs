//! Null View Observer - live world state synchronization engine.
//!
//! Keeps a local picture of one simulated world in step with the Simulation
//! Service. A live channel streams event envelopes into a bounded log while
//! HTTP fetches supply snapshots and the persisted feed. Projections turn the
//! shared state into the rows and cards a dashboard reads.
//!
//! Layout:
//! - `ports` - outbound traits for the HTTP API and the live channel
//! - `infrastructure` - reqwest and tokio-tungstenite adapters, connection state
//! - `state` - the `WorldStore` and the containers it owns
//! - `application` - connection, pagination and world use cases
//! - `projections` - pure views over store snapshots

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod projections;
pub mod state;

pub use application::{ConnectionManager, FeedPaginator, WorldService};
pub use config::{ConfigError, ObserverConfig};
pub use state::{WorldSnapshot, WorldStore};

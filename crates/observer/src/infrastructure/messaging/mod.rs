//! Connection lifecycle messaging
//!
//! `ConnectionState` is written by the connection manager's session task and
//! read through `ConnectionStateObserver` by anyone else.

pub mod connection;

pub use connection::{ConnectionCell, ConnectionState, ConnectionStateObserver, SessionToken};

pub mod http_client;
pub mod messaging;
pub mod websocket;

#[cfg(test)]
pub mod testing;

// Re-export messaging types
pub use messaging::{ConnectionState, ConnectionStateObserver};

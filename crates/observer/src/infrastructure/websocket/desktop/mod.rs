//! Desktop (tokio) live channel adapter

mod client;

pub use client::TungsteniteLiveChannel;

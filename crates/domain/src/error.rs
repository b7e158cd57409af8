//! Errors raised while building or decoding domain values
//!
//! Adapters map these onto their own error enums; nothing in the domain
//! reaches for `anyhow`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before it reaches the Simulation Service
    #[error("Rejected input: {0}")]
    Validation(String),

    /// A string that should hold a UUID did not
    #[error("Malformed identifier: {0}")]
    InvalidId(String),

    /// A wire enum carried a value this build does not know
    #[error("Unrecognised value: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

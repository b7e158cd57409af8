//! Request bodies and query parameters for the Simulation Service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size the service uses when none is given.
pub const DEFAULT_FEED_PAGE_SIZE: u32 = 20;

/// Largest page the service will return.
pub const MAX_FEED_PAGE_SIZE: u32 = 50;

/// Body of `POST /api/worlds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorldRequest {
    pub seed_prompt: String,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl CreateWorldRequest {
    pub fn new(seed_prompt: impl Into<String>) -> Self {
        Self {
            seed_prompt: seed_prompt.into(),
            config: Map::new(),
        }
    }
}

/// Query of `GET /api/worlds/{id}/feed`.
///
/// `before` is an exclusive upper bound: the `created_at` of the oldest item
/// the caller already holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPageQuery {
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

impl FeedPageQuery {
    pub fn first(limit: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_FEED_PAGE_SIZE),
            before: None,
        }
    }

    pub fn before(limit: u32, cursor: impl Into<String>) -> Self {
        Self {
            limit: limit.clamp(1, MAX_FEED_PAGE_SIZE),
            before: Some(cursor.into()),
        }
    }
}

impl Default for FeedPageQuery {
    fn default() -> Self {
        Self::first(DEFAULT_FEED_PAGE_SIZE)
    }
}

/// Query of `GET /api/worlds`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListWorldsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

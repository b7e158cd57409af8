//! Wiki page entity - collectively edited world lore

use serde::{Deserialize, Serialize};

use crate::{DomainError, WikiPageId, WorldId};

/// Editorial status of a wiki page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WikiStatus {
    Draft,
    Canon,
    Legend,
    Disputed,
}

impl WikiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WikiStatus::Draft => "draft",
            WikiStatus::Canon => "canon",
            WikiStatus::Legend => "legend",
            WikiStatus::Disputed => "disputed",
        }
    }
}

impl std::fmt::Display for WikiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WikiStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "canon" => Ok(Self::Canon),
            "legend" => Ok(Self::Legend),
            "disputed" => Ok(Self::Disputed),
            other => Err(DomainError::parse(format!("unknown wiki status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiPage {
    pub id: WikiPageId,
    pub world_id: WorldId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub status: WikiStatus,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

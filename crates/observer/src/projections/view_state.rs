//! World view lifecycle
//!
//! `loading → generating → running | paused → completed`, with `error`
//! absorbing. A world still in `created` has not been started and reads as
//! paused.

use nullview_domain::WorldStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Loading,
    Generating,
    Running,
    Paused,
    Completed,
    Error,
}

impl ViewPhase {
    pub fn from_status(status: WorldStatus) -> Self {
        match status {
            WorldStatus::Created | WorldStatus::Paused => ViewPhase::Paused,
            WorldStatus::Generating => ViewPhase::Generating,
            WorldStatus::Running => ViewPhase::Running,
            WorldStatus::Completed => ViewPhase::Completed,
            WorldStatus::Error => ViewPhase::Error,
        }
    }

    /// Next phase after observing `status`; `None` means nothing new was seen.
    pub fn advance(self, status: Option<WorldStatus>) -> Self {
        match (self, status) {
            (ViewPhase::Error, _) => ViewPhase::Error,
            (phase, None) => phase,
            (_, Some(status)) => Self::from_status(status),
        }
    }

    /// Whether the world snapshot should be polled in this phase.
    pub fn polls_world(&self) -> bool {
        *self == ViewPhase::Generating
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewPhase::Loading => "loading",
            ViewPhase::Generating => "generating",
            ViewPhase::Running => "running",
            ViewPhase::Paused => "paused",
            ViewPhase::Completed => "completed",
            ViewPhase::Error => "error",
        }
    }
}

impl std::fmt::Display for ViewPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

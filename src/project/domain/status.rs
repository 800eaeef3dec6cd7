//! Project lifecycle status and transition rules.

use super::ParseProjectStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work on the project is ongoing.
    #[default]
    Active,
    /// The project has been finished.
    Completed,
    /// The project has been shelved; it can be reactivated.
    Archived,
}

impl ProjectStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Active, Self::Completed, Self::Archived];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Statuses reachable from `self` in one step, excluding `self`.
    #[must_use]
    pub const fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Completed, Self::Archived],
            Self::Completed => &[Self::Archived, Self::Active],
            Self::Archived => &[Self::Active],
        }
    }

    /// Returns whether moving from `self` to `target` is permitted.
    ///
    /// Staying in the same status is always permitted.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Active | Self::Completed | Self::Archived)
                | (Self::Completed, Self::Completed | Self::Archived | Self::Active)
                | (Self::Archived, Self::Archived | Self::Active)
        )
    }
}

/// Returns whether a project may move from `current` to `requested`.
///
/// The validator only answers the question; callers build the error.
#[must_use]
pub const fn can_transition(current: ProjectStatus, requested: ProjectStatus) -> bool {
    current.can_transition_to(requested)
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

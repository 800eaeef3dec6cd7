//! Error types for project domain validation and parsing.

use super::{ProjectId, ProjectStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name is required")]
    EmptyName,

    /// The project name exceeds the storage limit.
    #[error("project name exceeds {max} characters (got {actual})")]
    NameTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected name in characters.
        actual: usize,
    },

    /// The value is not a valid project identifier.
    #[error("invalid project identifier: {0}")]
    InvalidProjectId(String),

    /// The requested status change is not permitted.
    #[error("cannot transition project {project_id} from {from} to {to}")]
    InvalidStatusTransition {
        /// Project whose transition was rejected.
        project_id: ProjectId,
        /// Current status.
        from: ProjectStatus,
        /// Requested status.
        to: ProjectStatus,
    },
}

/// Error returned while parsing project statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

//! Domain model for projects.
//!
//! Holds the project aggregate, its validated scalars, and the status
//! transition rules. Infrastructure concerns stay outside this boundary.

mod error;
mod ids;
mod name;
mod project;
mod status;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use name::ProjectName;
pub use project::{NewProjectData, PersistedProjectData, Project, ProjectUpdate};
pub use status::{ProjectStatus, can_transition};

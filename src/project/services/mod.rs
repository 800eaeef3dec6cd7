//! Application services for project management.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
    UpdateProjectRequest,
};

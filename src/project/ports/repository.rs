//! Repository port for project persistence and lookup.

use crate::identity::UserId;
use crate::project::domain::{Project, ProjectId, ProjectStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
///
/// Every read and write is scoped to an owning user. Rows owned by another
/// user behave exactly as if they did not exist.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the project
    /// ID already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist for its owner.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist for `owner`.
    async fn find_by_id(
        &self,
        owner: UserId,
        id: ProjectId,
    ) -> ProjectRepositoryResult<Option<Project>>;

    /// Lists the owner's projects, most recently created first.
    ///
    /// Projects sharing a creation timestamp are ordered by insertion,
    /// latest first.
    ///
    /// When `status` is set only projects in that status are returned.
    async fn list(
        &self,
        owner: UserId,
        status: Option<ProjectStatus>,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Deletes a project.
    ///
    /// Tasks referencing the project are not touched by this call; what
    /// happens to them is up to the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist for `owner`.
    async fn delete(&self, owner: UserId, id: ProjectId) -> ProjectRepositoryResult<()>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

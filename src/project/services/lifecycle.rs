//! Service layer for project creation, lookup, update, and deletion.

use crate::identity::{IdentityError, UserContext};
use crate::project::{
    domain::{
        NewProjectData, Project, ProjectDomainError, ProjectId, ProjectName, ProjectStatus,
        ProjectUpdate,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    status: Option<ProjectStatus>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            status: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status. Defaults to [`ProjectStatus::Active`].
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for a partial project update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<Option<String>>,
    status: Option<ProjectStatus>,
}

impl UpdateProjectRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the project name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the project description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Requests a status change.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn into_domain(self) -> Result<ProjectUpdate, ProjectDomainError> {
        let name = self.name.map(ProjectName::new).transpose()?;
        Ok(ProjectUpdate {
            name,
            description: self.description,
            status: self.status,
        })
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// The acting session has no user.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a project owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when the name is invalid,
    /// [`ProjectServiceError::Identity`] when the context is anonymous, or
    /// [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn create_project(
        &self,
        context: &UserContext,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            status,
        } = request;
        let project_name = ProjectName::new(name)?;
        let owner = context.require_user()?;

        let project = Project::new(
            NewProjectData {
                owner,
                name: project_name,
                description,
                status: status.unwrap_or_default(),
            },
            &*self.clock,
        );
        self.repository.store(&project).await?;
        tracing::debug!(project_id = %project.id(), owner = %owner, "project created");
        Ok(project)
    }

    /// Retrieves a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when the project
    /// does not exist for the acting user.
    pub async fn get_project(
        &self,
        context: &UserContext,
        id: ProjectId,
    ) -> ProjectServiceResult<Project> {
        let owner = context.require_user()?;
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(id).into())
    }

    /// Lists the acting user's projects, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the context is anonymous or the
    /// lookup fails.
    pub async fn list_projects(
        &self,
        context: &UserContext,
        status: Option<ProjectStatus>,
    ) -> ProjectServiceResult<Vec<Project>> {
        let owner = context.require_user()?;
        Ok(self.repository.list(owner, status).await?)
    }

    /// Applies a partial update to a project.
    ///
    /// A requested status is checked against the transition rules before
    /// anything is written. An empty request returns the stored project
    /// without writing.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for an invalid name or a
    /// rejected status transition, and [`ProjectServiceError::Repository`]
    /// when the project is missing or persistence fails.
    pub async fn update_project(
        &self,
        context: &UserContext,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let update = request.into_domain()?;
        let mut project = self.get_project(context, id).await?;
        if update.is_empty() {
            return Ok(project);
        }

        project.apply(update, &*self.clock)?;
        self.repository.update(&project).await?;
        tracing::debug!(project_id = %id, status = %project.status(), "project updated");
        Ok(project)
    }

    /// Moves a project to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidStatusTransition`] (wrapped) when
    /// the transition is not permitted.
    pub async fn transition_project(
        &self,
        context: &UserContext,
        id: ProjectId,
        status: ProjectStatus,
    ) -> ProjectServiceResult<Project> {
        self.update_project(context, id, UpdateProjectRequest::new().with_status(status))
            .await
    }

    /// Deletes a project. Tasks referencing it are left to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when the project does not
    /// exist or deletion fails.
    pub async fn delete_project(
        &self,
        context: &UserContext,
        id: ProjectId,
    ) -> ProjectServiceResult<()> {
        let owner = context.require_user()?;
        self.repository.delete(owner, id).await?;
        tracing::debug!(project_id = %id, "project deleted");
        Ok(())
    }
}

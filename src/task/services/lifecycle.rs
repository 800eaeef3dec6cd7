//! Service layer for task creation, lookup, update, and deletion.

use crate::identity::{IdentityError, UserContext};
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{
        NewTaskData, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle,
        TaskUpdate,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<NaiveDate>,
    project_id: Option<ProjectId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            project_id: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status. Defaults to [`TaskStatus::Todo`].
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority. Defaults to [`TaskPriority::Medium`].
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Places the task under a project.
    #[must_use]
    pub const fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<NaiveDate>>,
    project_id: Option<Option<ProjectId>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Moves the task under a project.
    #[must_use]
    pub const fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(Some(project_id));
        self
    }

    /// Detaches the task from its project.
    #[must_use]
    pub const fn standalone(mut self) -> Self {
        self.project_id = Some(None);
        self
    }

    fn into_domain(self) -> Result<TaskUpdate, TaskDomainError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        Ok(TaskUpdate {
            title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            project_id: self.project_id,
        })
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The acting session has no user.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a task owned by the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the title is invalid,
    /// [`TaskServiceError::Identity`] when the context is anonymous, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create_task(
        &self,
        context: &UserContext,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            status,
            priority,
            due_date,
            project_id,
        } = request;
        let task_title = TaskTitle::new(title)?;
        let owner = context.require_user()?;

        let task = Task::new(
            NewTaskData {
                owner,
                title: task_title,
                description,
                status: status.unwrap_or_default(),
                priority: priority.unwrap_or_default(),
                due_date,
                project_id,
            },
            &*self.clock,
        );
        self.repository.store(&task).await?;
        tracing::debug!(task_id = %task.id(), owner = %owner, "task created");
        Ok(task)
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist for the acting user.
    pub async fn get_task(&self, context: &UserContext, id: TaskId) -> TaskServiceResult<Task> {
        let owner = context.require_user()?;
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(id).into())
    }

    /// Lists all of the acting user's tasks, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the context is anonymous or the
    /// lookup fails.
    pub async fn list_tasks(&self, context: &UserContext) -> TaskServiceResult<Vec<Task>> {
        let owner = context.require_user()?;
        Ok(self.repository.list(owner, None).await?)
    }

    /// Lists the acting user's tasks in one project, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when the context is anonymous or the
    /// lookup fails.
    pub async fn list_tasks_by_project(
        &self,
        context: &UserContext,
        project_id: ProjectId,
    ) -> TaskServiceResult<Vec<Task>> {
        let owner = context.require_user()?;
        Ok(self.repository.list(owner, Some(project_id)).await?)
    }

    /// Applies a partial update to a task. An empty request returns the
    /// stored task without writing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title and
    /// [`TaskServiceError::Repository`] when the task is missing or
    /// persistence fails.
    pub async fn update_task(
        &self,
        context: &UserContext,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let update = request.into_domain()?;
        let mut task = self.get_task(context, id).await?;
        if update.is_empty() {
            return Ok(task);
        }

        task.apply(update, &*self.clock);
        self.repository.update(&task).await?;
        tracing::debug!(task_id = %id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Sets a task's status. Task statuses are not transition-guarded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the task is missing or
    /// persistence fails.
    pub async fn set_status(
        &self,
        context: &UserContext,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskServiceResult<Task> {
        self.update_task(context, id, UpdateTaskRequest::new().with_status(status))
            .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the task does not exist
    /// or deletion fails.
    pub async fn delete_task(&self, context: &UserContext, id: TaskId) -> TaskServiceResult<()> {
        let owner = context.require_user()?;
        self.repository.delete(owner, id).await?;
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }
}

//! Read-side orchestration combining projects, tasks, and statistics.

use std::collections::HashMap;
use std::sync::Arc;

use crate::board::filter::{ProjectFilter, TaskFilter};
use crate::identity::{IdentityError, UserContext, UserId};
use crate::project::{
    domain::{Project, ProjectId, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::stats::{ProjectStats, ProjectStatusCounts, TaskStats};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use thiserror::Error;

/// Service-level errors for board loads.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// The acting session has no user.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Project lookup failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    Task(#[from] TaskRepositoryError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Everything shown on a project's detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    /// The project itself.
    pub project: Project,
    /// Tasks in the project, most recent first.
    pub tasks: Vec<Task>,
    /// Progress summary for the project.
    pub stats: ProjectStats,
}

/// Projects in one status tab, with their progress and per-tab counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectsOverview {
    /// Selected tab.
    pub tab: ProjectStatus,
    /// Projects in the selected tab, most recent first.
    pub projects: Vec<Project>,
    /// Progress per project. Projects whose stats failed to load are absent.
    pub stats: HashMap<ProjectId, ProjectStats>,
    /// Project counts across all tabs.
    pub counts: ProjectStatusCounts,
}

/// Board read service.
#[derive(Clone)]
pub struct BoardService<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    projects: Arc<P>,
    tasks: Arc<T>,
}

impl<P, T> BoardService<P, T>
where
    P: ProjectRepository,
    T: TaskRepository,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<T>) -> Self {
        Self { projects, tasks }
    }

    /// Loads a project, its tasks, and its stats as one batch.
    ///
    /// The three lookups run concurrently. If any fails the whole load fails
    /// and nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the context is anonymous, the
    /// project does not exist, or any lookup fails.
    pub async fn project_detail(
        &self,
        context: &UserContext,
        id: ProjectId,
    ) -> BoardServiceResult<ProjectDetail> {
        let owner = context.require_user()?;
        let (project, tasks, stats) = tokio::try_join!(
            self.find_project(owner, id),
            self.project_tasks(owner, id),
            self.stats_for(owner, id),
        )?;
        Ok(ProjectDetail {
            project,
            tasks,
            stats,
        })
    }

    /// Computes progress for one project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the context is anonymous or the
    /// task lookup fails.
    pub async fn project_stats(
        &self,
        context: &UserContext,
        id: ProjectId,
    ) -> BoardServiceResult<ProjectStats> {
        let owner = context.require_user()?;
        self.stats_for(owner, id).await
    }

    /// Computes progress for each project, skipping failures.
    ///
    /// A failed lookup for one project is logged and that project is left
    /// out of the map; the remaining projects are still loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Identity`] when the context is anonymous.
    pub async fn project_stats_map(
        &self,
        context: &UserContext,
        projects: &[Project],
    ) -> BoardServiceResult<HashMap<ProjectId, ProjectStats>> {
        let owner = context.require_user()?;
        let mut stats_by_project = HashMap::with_capacity(projects.len());
        for project in projects {
            match self.stats_for(owner, project.id()).await {
                Ok(stats) => {
                    stats_by_project.insert(project.id(), stats);
                }
                Err(err) => {
                    tracing::warn!(
                        project_id = %project.id(),
                        error = %err,
                        "failed to load project stats; skipping"
                    );
                }
            }
        }
        Ok(stats_by_project)
    }

    /// Loads the projects in one status tab together with their progress and
    /// the per-status counts for every tab.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the context is anonymous or the
    /// project listing fails. Per-project stats failures are skipped.
    pub async fn projects_overview(
        &self,
        context: &UserContext,
        tab: ProjectStatus,
    ) -> BoardServiceResult<ProjectsOverview> {
        let owner = context.require_user()?;
        let all_projects = self.projects.list(owner, None).await?;
        let counts = ProjectStatusCounts::from_projects(&all_projects);
        let projects: Vec<Project> = all_projects
            .into_iter()
            .filter(|project| project.status() == tab)
            .collect();
        let stats = self.project_stats_map(context, &projects).await?;

        Ok(ProjectsOverview {
            tab,
            projects,
            stats,
            counts,
        })
    }

    /// Counts all of the acting user's tasks by status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the context is anonymous or the
    /// task lookup fails.
    pub async fn task_stats(&self, context: &UserContext) -> BoardServiceResult<TaskStats> {
        let owner = context.require_user()?;
        let tasks = self.tasks.list(owner, None).await?;
        Ok(TaskStats::from_tasks(&tasks))
    }

    /// Lists the acting user's tasks that satisfy `filter`, most recent
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the context is anonymous or the
    /// task lookup fails.
    pub async fn filtered_tasks(
        &self,
        context: &UserContext,
        filter: &TaskFilter,
    ) -> BoardServiceResult<Vec<Task>> {
        let owner = context.require_user()?;
        let project_id = match filter.project {
            ProjectFilter::Project(id) => Some(id),
            ProjectFilter::Any | ProjectFilter::Unassigned => None,
        };
        let tasks = self.tasks.list(owner, project_id).await?;
        Ok(filter.retain(tasks))
    }

    async fn find_project(&self, owner: UserId, id: ProjectId) -> BoardServiceResult<Project> {
        self.projects
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(id).into())
    }

    async fn project_tasks(&self, owner: UserId, id: ProjectId) -> BoardServiceResult<Vec<Task>> {
        Ok(self.tasks.list(owner, Some(id)).await?)
    }

    async fn stats_for(&self, owner: UserId, id: ProjectId) -> BoardServiceResult<ProjectStats> {
        let tasks = self.tasks.list(owner, Some(id)).await?;
        Ok(ProjectStats::from_tasks(&tasks))
    }
}

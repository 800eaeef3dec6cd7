//! Task filter state.
//!
//! A [`TaskFilter`] is a value object. Builders return a new filter rather
//! than mutating shared state, so UI code can treat them as reducers.

use crate::project::domain::{ProjectDomainError, ProjectId};
use crate::task::domain::{Task, TaskPriority, TaskStatus};

/// Constraint on a task's project reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProjectFilter {
    /// No constraint.
    #[default]
    Any,
    /// Only standalone tasks.
    Unassigned,
    /// Only tasks referencing the given project.
    Project(ProjectId),
}

impl ProjectFilter {
    /// Query value selecting standalone tasks.
    pub const UNASSIGNED_KEY: &'static str = "none";
    /// Query value selecting every task.
    pub const ANY_KEY: &'static str = "all";

    /// Parses a query value: empty or `all` means no constraint, `none`
    /// selects standalone tasks, anything else must be a project identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidProjectId`] for any other value
    /// that is not a project identifier.
    pub fn parse(value: &str) -> Result<Self, ProjectDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ANY_KEY) {
            return Ok(Self::Any);
        }
        if trimmed.eq_ignore_ascii_case(Self::UNASSIGNED_KEY) {
            return Ok(Self::Unassigned);
        }
        trimmed.parse().map(Self::Project)
    }

    /// Returns whether `project_id` satisfies this constraint.
    #[must_use]
    pub fn matches(self, project_id: Option<ProjectId>) -> bool {
        match self {
            Self::Any => true,
            Self::Unassigned => project_id.is_none(),
            Self::Project(wanted) => project_id == Some(wanted),
        }
    }
}

/// Combined task filter. Every set dimension must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskFilter {
    /// Required status.
    pub status: Option<TaskStatus>,
    /// Required priority.
    pub priority: Option<TaskPriority>,
    /// Project constraint.
    pub project: ProjectFilter,
}

impl TaskFilter {
    /// Filter with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy constrained to `status`, or unconstrained for `None`.
    #[must_use]
    pub const fn with_status(self, status: Option<TaskStatus>) -> Self {
        Self { status, ..self }
    }

    /// Returns a copy constrained to `priority`, or unconstrained for `None`.
    #[must_use]
    pub const fn with_priority(self, priority: Option<TaskPriority>) -> Self {
        Self { priority, ..self }
    }

    /// Returns a copy with a new project constraint.
    #[must_use]
    pub const fn with_project(self, project: ProjectFilter) -> Self {
        Self { project, ..self }
    }

    /// Returns an unconstrained filter.
    #[must_use]
    pub const fn cleared(self) -> Self {
        self.with_status(None)
            .with_priority(None)
            .with_project(ProjectFilter::Any)
    }

    /// Returns `true` when at least one dimension is constrained.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.project != ProjectFilter::Any
    }

    /// Returns whether `task` satisfies every constrained dimension.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.project.matches(task.project_id())
    }

    /// Returns the matching tasks, preserving input order.
    #[must_use]
    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }

    /// Owned variant of [`Self::apply`].
    #[must_use]
    pub fn retain(&self, mut tasks: Vec<Task>) -> Vec<Task> {
        tasks.retain(|task| self.matches(task));
        tasks
    }
}

//! Task and project statistics.
//!
//! Pure aggregation over task and project collections. Results depend only
//! on the multiset of statuses in the input, never on its order.

use crate::project::domain::{Project, ProjectStatus};
use crate::task::domain::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Per-status task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Number of tasks counted.
    pub total: usize,
    /// Tasks not yet started.
    pub todo: usize,
    /// Tasks underway.
    pub in_progress: usize,
    /// Finished tasks.
    pub done: usize,
}

impl TaskStats {
    /// Counts tasks by status.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        Self::from_statuses(tasks.into_iter().map(Task::status))
    }

    /// Counts a sequence of statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut stats, status| {
            stats.total += 1;
            match status {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Done => stats.done += 1,
            }
            stats
        })
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Done => self.done,
        }
    }
}

/// Progress summary for the tasks of one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    /// Number of tasks in the project.
    pub total: usize,
    /// Finished tasks.
    pub done: usize,
    /// Tasks underway.
    pub in_progress: usize,
    /// Tasks not yet started.
    pub todo: usize,
    /// `done / total * 100`, or `0.0` for an empty project. Not rounded.
    pub completion_percentage: f64,
}

impl ProjectStats {
    /// Aggregates the tasks of one project.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        Self::from(TaskStats::from_tasks(tasks))
    }

    /// Returns `true` when every task is done and there is at least one.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

impl From<TaskStats> for ProjectStats {
    fn from(stats: TaskStats) -> Self {
        Self {
            total: stats.total,
            done: stats.done,
            in_progress: stats.in_progress,
            todo: stats.todo,
            completion_percentage: completion_percentage(stats.done, stats.total),
        }
    }
}

/// Percentage of `done` over `total`, `0.0` when `total` is zero.
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "task counts are far below 2^52 and the ratio is a display value"
)]
#[must_use]
pub fn completion_percentage(done: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    done as f64 / total as f64 * 100.0
}

/// Project counts per status, used for status tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatusCounts {
    /// Active projects.
    pub active: usize,
    /// Completed projects.
    pub completed: usize,
    /// Archived projects.
    pub archived: usize,
}

impl ProjectStatusCounts {
    /// Counts projects by status.
    #[must_use]
    pub fn from_projects<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |mut counts, project| {
                match project.status() {
                    ProjectStatus::Active => counts.active += 1,
                    ProjectStatus::Completed => counts.completed += 1,
                    ProjectStatus::Archived => counts.archived += 1,
                }
                counts
            })
    }

    /// Returns the count for one status.
    #[must_use]
    pub const fn count(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Active => self.active,
            ProjectStatus::Completed => self.completed,
            ProjectStatus::Archived => self.archived,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "completion percentages are compared within a tolerance"
)]
mod tests {
    use super::{ProjectStats, ProjectStatusCounts, TaskStats, completion_percentage};
    use crate::identity::UserId;
    use crate::project::domain::{NewProjectData, Project, ProjectName, ProjectStatus};
    use crate::task::domain::TaskStatus;
    use rstest::rstest;

    fn statuses(todo: usize, in_progress: usize, done: usize) -> Vec<TaskStatus> {
        std::iter::repeat_n(TaskStatus::Todo, todo)
            .chain(std::iter::repeat_n(TaskStatus::InProgress, in_progress))
            .chain(std::iter::repeat_n(TaskStatus::Done, done))
            .collect()
    }

    #[rstest]
    fn empty_collection_has_zero_completion() {
        let stats = ProjectStats::from(TaskStats::from_statuses(Vec::new()));
        assert_eq!(stats, ProjectStats::default());
        assert!(stats.completion_percentage.abs() < f64::EPSILON);
        assert!(!stats.is_complete());
    }

    #[rstest]
    fn three_of_ten_done_is_thirty_percent() {
        let stats = ProjectStats::from(TaskStats::from_statuses(statuses(5, 2, 3)));

        assert_eq!(stats.total, 10);
        assert_eq!(stats.done, 3);
        assert_eq!(stats.in_progress, 2);
        assert_eq!(stats.todo, 5);
        assert!((stats.completion_percentage - 30.0).abs() < 1e-9);
    }

    #[rstest]
    fn percentage_is_not_rounded() {
        let percentage = completion_percentage(1, 3);
        assert!((percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[rstest]
    fn counts_ignore_input_order() {
        let forward = statuses(4, 1, 2);
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(
            TaskStats::from_statuses(forward),
            TaskStats::from_statuses(backward)
        );
    }

    #[rstest]
    #[case(0, 0, 4, true)]
    #[case(1, 0, 4, false)]
    #[case(0, 0, 0, false)]
    fn completion_flag(
        #[case] todo: usize,
        #[case] in_progress: usize,
        #[case] done: usize,
        #[case] expected: bool,
    ) {
        let stats = ProjectStats::from(TaskStats::from_statuses(statuses(todo, in_progress, done)));
        assert_eq!(stats.is_complete(), expected);
    }

    #[rstest]
    fn per_status_lookup_matches_fields() {
        let stats = TaskStats::from_statuses(statuses(2, 3, 1));
        for status in TaskStatus::ALL {
            let expected = match status {
                TaskStatus::Todo => 2,
                TaskStatus::InProgress => 3,
                TaskStatus::Done => 1,
            };
            assert_eq!(stats.count(status), expected);
        }
        assert_eq!(stats.total, 6);
    }

    #[rstest]
    fn project_counts_group_by_status() {
        let owner = UserId::new();
        let projects: Vec<Project> = [
            ProjectStatus::Active,
            ProjectStatus::Archived,
            ProjectStatus::Active,
        ]
        .into_iter()
        .map(|status| {
            Project::new(
                NewProjectData {
                    owner,
                    name: ProjectName::new("Counted").expect("valid name"),
                    description: None,
                    status,
                },
                &mockable::DefaultClock,
            )
        })
        .collect();

        let counts = ProjectStatusCounts::from_projects(&projects);

        assert_eq!(counts.count(ProjectStatus::Active), 2);
        assert_eq!(counts.count(ProjectStatus::Completed), 0);
        assert_eq!(counts.count(ProjectStatus::Archived), 1);
    }
}

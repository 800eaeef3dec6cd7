//! In-memory integration tests for combined board loads.

#![expect(
    clippy::float_arithmetic,
    reason = "completion percentages are compared within a tolerance"
)]

use super::helpers::{Workspace, workspace};
use eyre::WrapErr;
use rstest::rstest;
use taskboard::{
    board::{ProjectFilter, TaskFilter},
    project::{domain::ProjectStatus, services::CreateProjectRequest},
    task::{
        domain::{TaskPriority, TaskStatus},
        services::CreateTaskRequest,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_detail_reflects_task_progress(workspace: Workspace) -> Result<(), eyre::Report> {
    let project = workspace
        .projects
        .create_project(&workspace.context, CreateProjectRequest::new("Release"))
        .await
        .wrap_err("create project")?;
    for (title, status) in [
        ("changelog", TaskStatus::Done),
        ("tag", TaskStatus::Done),
        ("announce", TaskStatus::Todo),
        ("publish", TaskStatus::InProgress),
    ] {
        workspace
            .tasks
            .create_task(
                &workspace.context,
                CreateTaskRequest::new(title)
                    .with_status(status)
                    .in_project(project.id()),
            )
            .await
            .wrap_err("create task")?;
    }

    let detail = workspace
        .board
        .project_detail(&workspace.context, project.id())
        .await
        .wrap_err("load project detail")?;

    eyre::ensure!(detail.project.id() == project.id(), "same project");
    eyre::ensure!(detail.tasks.len() == 4, "all project tasks loaded");
    eyre::ensure!(detail.stats.total == 4, "stats total");
    eyre::ensure!(detail.stats.done == 2, "stats done");
    eyre::ensure!(
        (detail.stats.completion_percentage - 50.0).abs() < f64::EPSILON,
        "half complete, got {}",
        detail.stats.completion_percentage
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overview_groups_projects_by_tab(workspace: Workspace) -> Result<(), eyre::Report> {
    let mut completed = None;
    for (name, status) in [
        ("one", ProjectStatus::Active),
        ("two", ProjectStatus::Completed),
        ("three", ProjectStatus::Archived),
        ("four", ProjectStatus::Archived),
    ] {
        let project = workspace
            .projects
            .create_project(
                &workspace.context,
                CreateProjectRequest::new(name).with_status(status),
            )
            .await
            .wrap_err("create project")?;
        if status == ProjectStatus::Completed {
            completed = Some(project.id());
        }
    }
    let completed_id = completed.ok_or_else(|| eyre::eyre!("completed project created"))?;

    let overview = workspace
        .board
        .projects_overview(&workspace.context, ProjectStatus::Completed)
        .await
        .wrap_err("load overview")?;

    eyre::ensure!(overview.tab == ProjectStatus::Completed, "selected tab");
    eyre::ensure!(overview.projects.len() == 1, "one completed project");
    eyre::ensure!(overview.counts.archived == 2, "archived count");
    eyre::ensure!(overview.counts.active == 1, "active count");
    let stats = overview
        .stats
        .get(&completed_id)
        .ok_or_else(|| eyre::eyre!("stats for completed project"))?;
    eyre::ensure!(stats.total == 0, "no tasks yet");
    eyre::ensure!(
        stats.completion_percentage.abs() < f64::EPSILON,
        "empty project is 0%"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_compose_across_dimensions(workspace: Workspace) -> Result<(), eyre::Report> {
    let project = workspace
        .projects
        .create_project(&workspace.context, CreateProjectRequest::new("Home"))
        .await
        .wrap_err("create project")?;
    let specs = [
        ("a", TaskStatus::Done, TaskPriority::High, false),
        ("b", TaskStatus::Done, TaskPriority::Low, true),
        ("c", TaskStatus::Todo, TaskPriority::High, false),
        ("d", TaskStatus::Done, TaskPriority::High, true),
        ("e", TaskStatus::Done, TaskPriority::Medium, false),
    ];
    for (title, status, priority, in_project) in specs {
        let mut request = CreateTaskRequest::new(title)
            .with_status(status)
            .with_priority(priority);
        if in_project {
            request = request.in_project(project.id());
        }
        workspace
            .tasks
            .create_task(&workspace.context, request)
            .await
            .wrap_err("create task")?;
    }

    let standalone_done = workspace
        .board
        .filtered_tasks(
            &workspace.context,
            &TaskFilter::new()
                .with_status(Some(TaskStatus::Done))
                .with_project(ProjectFilter::Unassigned),
        )
        .await
        .wrap_err("filter standalone done")?;
    let titles: Vec<_> = standalone_done
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();
    eyre::ensure!(titles == ["e", "a"], "newest first, got {titles:?}");

    let urgent_in_project = workspace
        .board
        .filtered_tasks(
            &workspace.context,
            &TaskFilter::new()
                .with_priority(Some(TaskPriority::High))
                .with_project(ProjectFilter::Project(project.id())),
        )
        .await
        .wrap_err("filter high priority in project")?;
    eyre::ensure!(urgent_in_project.len() == 1, "only task d matches");

    let everything = workspace
        .board
        .filtered_tasks(&workspace.context, &TaskFilter::new().cleared())
        .await
        .wrap_err("unfiltered")?;
    eyre::ensure!(everything.len() == 5, "cleared filter keeps every task");

    let stats = workspace
        .board
        .task_stats(&workspace.context)
        .await
        .wrap_err("task stats")?;
    eyre::ensure!(stats.done == 4 && stats.todo == 1, "global counts");
    Ok(())
}

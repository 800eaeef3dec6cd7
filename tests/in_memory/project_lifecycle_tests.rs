//! In-memory integration tests for project lifecycle operations.

use super::helpers::{Workspace, workspace};
use eyre::WrapErr;
use rstest::rstest;
use taskboard::{
    identity::{IdentityError, UserContext},
    project::{
        domain::{ProjectDomainError, ProjectStatus},
        ports::ProjectRepositoryError,
        services::{CreateProjectRequest, ProjectServiceError, UpdateProjectRequest},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_project_defaults_to_active_and_reads_back(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let created = workspace
        .projects
        .create_project(
            &workspace.context,
            CreateProjectRequest::new("  Kitchen remodel ").with_description("Phase one"),
        )
        .await
        .wrap_err("create project")?;

    eyre::ensure!(created.status() == ProjectStatus::Active, "default status");
    eyre::ensure!(created.name().as_str() == "Kitchen remodel", "name is trimmed");

    let fetched = workspace
        .projects
        .get_project(&workspace.context, created.id())
        .await
        .wrap_err("get project")?;
    eyre::ensure!(fetched == created, "read-back matches created project");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_newest_first_and_filters_by_status(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let mut created_ids = Vec::new();
    for (name, status) in [
        ("first", ProjectStatus::Active),
        ("second", ProjectStatus::Archived),
        ("third", ProjectStatus::Active),
    ] {
        let project = workspace
            .projects
            .create_project(
                &workspace.context,
                CreateProjectRequest::new(name).with_status(status),
            )
            .await
            .wrap_err("create project")?;
        created_ids.push(project.id());
    }

    let all = workspace
        .projects
        .list_projects(&workspace.context, None)
        .await
        .wrap_err("list projects")?;
    let listed: Vec<_> = all.iter().map(|project| project.id()).collect();
    created_ids.reverse();
    eyre::ensure!(listed == created_ids, "projects listed newest first");

    let active = workspace
        .projects
        .list_projects(&workspace.context, Some(ProjectStatus::Active))
        .await
        .wrap_err("list active projects")?;
    eyre::ensure!(active.len() == 2, "two active projects");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_users_cannot_see_or_delete_projects(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let created = workspace
        .projects
        .create_project(&workspace.context, CreateProjectRequest::new("Private"))
        .await
        .wrap_err("create project")?;
    let stranger = Workspace::stranger();

    let listed = workspace
        .projects
        .list_projects(&stranger, None)
        .await
        .wrap_err("list as stranger")?;
    eyre::ensure!(listed.is_empty(), "stranger sees no projects");

    let lookup = workspace.projects.get_project(&stranger, created.id()).await;
    eyre::ensure!(
        matches!(
            lookup,
            Err(ProjectServiceError::Repository(ProjectRepositoryError::NotFound(_)))
        ),
        "stranger lookup is not found, got {lookup:?}"
    );

    let deletion = workspace.projects.delete_project(&stranger, created.id()).await;
    eyre::ensure!(deletion.is_err(), "stranger cannot delete");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_changes_only_supplied_fields(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let created = workspace
        .projects
        .create_project(
            &workspace.context,
            CreateProjectRequest::new("Garden").with_description("Raised beds"),
        )
        .await
        .wrap_err("create project")?;

    let renamed = workspace
        .projects
        .update_project(
            &workspace.context,
            created.id(),
            UpdateProjectRequest::new().with_name("Backyard"),
        )
        .await
        .wrap_err("rename project")?;
    eyre::ensure!(renamed.name().as_str() == "Backyard", "name changed");
    eyre::ensure!(renamed.description() == Some("Raised beds"), "description kept");
    eyre::ensure!(renamed.status() == created.status(), "status kept");
    eyre::ensure!(renamed.updated_at() >= created.updated_at(), "updated_at moved");

    let cleared = workspace
        .projects
        .update_project(
            &workspace.context,
            created.id(),
            UpdateProjectRequest::new().clear_description(),
        )
        .await
        .wrap_err("clear description")?;
    eyre::ensure!(cleared.description().is_none(), "description cleared");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_update_returns_stored_project(workspace: Workspace) -> Result<(), eyre::Report> {
    let created = workspace
        .projects
        .create_project(&workspace.context, CreateProjectRequest::new("Garden"))
        .await
        .wrap_err("create project")?;

    let unchanged = workspace
        .projects
        .update_project(&workspace.context, created.id(), UpdateProjectRequest::new())
        .await
        .wrap_err("empty update")?;
    eyre::ensure!(unchanged == created, "empty update leaves project as stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_transition_leaves_other_fields_unwritten(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let created = workspace
        .projects
        .create_project(
            &workspace.context,
            CreateProjectRequest::new("Old").with_status(ProjectStatus::Archived),
        )
        .await
        .wrap_err("create project")?;

    let result = workspace
        .projects
        .update_project(
            &workspace.context,
            created.id(),
            UpdateProjectRequest::new()
                .with_name("New")
                .with_status(ProjectStatus::Completed),
        )
        .await;
    eyre::ensure!(
        matches!(
            result,
            Err(ProjectServiceError::Domain(
                ProjectDomainError::InvalidStatusTransition {
                    from: ProjectStatus::Archived,
                    to: ProjectStatus::Completed,
                    ..
                }
            ))
        ),
        "expected invalid transition, got {result:?}"
    );

    let stored = workspace
        .projects
        .get_project(&workspace.context, created.id())
        .await
        .wrap_err("reload project")?;
    eyre::ensure!(stored == created, "rejected update wrote nothing");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_creation_is_rejected(workspace: Workspace) -> Result<(), eyre::Report> {
    let result = workspace
        .projects
        .create_project(&UserContext::anonymous(), CreateProjectRequest::new("Garden"))
        .await;
    eyre::ensure!(
        matches!(
            result,
            Err(ProjectServiceError::Identity(IdentityError::NotAuthenticated))
        ),
        "expected NotAuthenticated, got {result:?}"
    );

    let listed = workspace
        .projects
        .list_projects(&workspace.context, None)
        .await
        .wrap_err("list projects")?;
    eyre::ensure!(listed.is_empty(), "nothing stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_project_is_gone(workspace: Workspace) -> Result<(), eyre::Report> {
    let created = workspace
        .projects
        .create_project(&workspace.context, CreateProjectRequest::new("Short-lived"))
        .await
        .wrap_err("create project")?;

    workspace
        .projects
        .delete_project(&workspace.context, created.id())
        .await
        .wrap_err("delete project")?;

    let lookup = workspace
        .projects
        .get_project(&workspace.context, created.id())
        .await;
    eyre::ensure!(lookup.is_err(), "deleted project is not found");
    Ok(())
}

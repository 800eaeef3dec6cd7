//! Then steps for project status transition BDD scenarios.

use super::world::{ProjectTransitionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::project::{
    domain::{ProjectDomainError, ProjectStatus},
    services::ProjectServiceError,
};

fn expected_status(status: &str) -> Result<ProjectStatus, eyre::Report> {
    ProjectStatus::try_from(status)
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))
}

#[then(r#"the project status is "{status}""#)]
fn project_status_is(world: &ProjectTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let project = world.project()?;
    if project.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            project.status()
        ));
    }
    Ok(())
}

#[then("the move fails with an invalid status transition error")]
fn move_fails_with_invalid_transition(
    world: &ProjectTransitionWorld,
) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(
        result,
        Err(ProjectServiceError::Domain(
            ProjectDomainError::InvalidStatusTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStatusTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then(r#"the stored project status is "{status}""#)]
fn stored_status_is(world: &ProjectTransitionWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let id = world.project()?.id();
    let stored = run_async(world.service.get_project(&world.context, id))
        .wrap_err("reload project after rejected move")?;
    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected stored status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

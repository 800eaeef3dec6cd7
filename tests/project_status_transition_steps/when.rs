//! When steps for project status transition BDD scenarios.

use super::world::{ProjectTransitionWorld, run_async};
use rstest_bdd_macros::when;
use taskboard::project::domain::ProjectStatus;

#[when(r#"the project is moved to "{target}""#)]
fn move_project(world: &mut ProjectTransitionWorld, target: String) -> Result<(), eyre::Report> {
    let requested = ProjectStatus::try_from(target.as_str())
        .map_err(|err| eyre::eyre!("invalid target status in scenario: {err}"))?;
    let id = world.project()?.id();

    let result = run_async(
        world
            .service
            .transition_project(&world.context, id, requested),
    );
    if let Ok(ref updated) = result {
        world.project = Some(updated.clone());
    }
    world.last_move_result = Some(result);
    Ok(())
}

//! Shared world state for project status transition BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    identity::UserContext,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::Project,
        services::{ProjectService, ProjectServiceError},
    },
};

/// Service type used by the BDD world.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;

/// Scenario world for project transition behaviour tests.
pub struct ProjectTransitionWorld {
    pub service: TestProjectService,
    pub context: UserContext,
    pub project: Option<Project>,
    pub last_move_result: Option<Result<Project, ProjectServiceError>>,
}

impl ProjectTransitionWorld {
    /// Creates a world with an anonymous context and no project.
    #[must_use]
    pub fn new() -> Self {
        let service = ProjectService::new(
            Arc::new(InMemoryProjectRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            context: UserContext::anonymous(),
            project: None,
            last_move_result: None,
        }
    }

    /// Returns the project created by the scenario.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }
}

impl Default for ProjectTransitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectTransitionWorld {
    ProjectTransitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Shared test helpers for in-memory repository integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::BoardService,
    identity::{UserContext, UserId},
    project::{adapters::memory::InMemoryProjectRepository, services::ProjectService},
    task::{adapters::memory::InMemoryTaskRepository, services::TaskService},
};

/// Project service over the in-memory adapter.
pub type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;
/// Task service over the in-memory adapter.
pub type TestTaskService = TaskService<InMemoryTaskRepository, DefaultClock>;
/// Board service over both in-memory adapters.
pub type TestBoardService = BoardService<InMemoryProjectRepository, InMemoryTaskRepository>;

/// Services sharing one pair of in-memory stores, plus an acting user.
pub struct Workspace {
    pub context: UserContext,
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
    pub board: TestBoardService,
}

impl Workspace {
    /// Returns a context for a different user of the same stores.
    #[must_use]
    pub fn stranger() -> UserContext {
        UserContext::authenticated(UserId::new())
    }
}

/// Provides fresh stores and services for each test.
#[fixture]
pub fn workspace() -> Workspace {
    let project_repository = Arc::new(InMemoryProjectRepository::new());
    let task_repository = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);

    Workspace {
        context: UserContext::authenticated(UserId::new()),
        projects: ProjectService::new(Arc::clone(&project_repository), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::clone(&task_repository), clock),
        board: BoardService::new(project_repository, task_repository),
    }
}

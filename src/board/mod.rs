//! View composition over projects and tasks.
//!
//! [`filter`] holds the pure task-filter state and its reducers.
//! [`service`] combines the project and task ports into the loads used by
//! list, detail, and overview screens.

pub mod filter;
pub mod service;

pub use filter::{ProjectFilter, TaskFilter};
pub use service::{
    BoardService, BoardServiceError, BoardServiceResult, ProjectDetail, ProjectsOverview,
};

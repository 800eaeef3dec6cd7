//! Taskboard: project and task tracking core.
//!
//! Authenticated users create projects and tasks, group tasks under
//! projects, move projects through a small status lifecycle, and read back
//! progress summaries.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over ports with an explicit [`identity::UserContext`]
//!
//! # Modules
//!
//! - [`project`]: Projects and the project status transition rules
//! - [`task`]: Tasks with status, priority, due date, and optional project
//! - [`stats`]: Per-status counts and completion percentages
//! - [`board`]: Task filtering and combined read-side loads
//! - [`identity`]: Acting-user context
//! - [`config`] and [`db`]: Store configuration and connection pooling
//! - [`telemetry`]: Tracing subscriber set-up

pub mod board;
pub mod config;
pub mod db;
pub mod identity;
pub mod project;
pub mod stats;
pub mod task;
pub mod telemetry;

//! Task management for Taskboard.
//!
//! Tasks carry a title, an unrestricted three-state status, a priority, an
//! optional due date and an optional project reference. A task without a
//! project is a standalone task. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

//! Project management for Taskboard.
//!
//! Projects group tasks and move through a small lifecycle
//! (`active`, `completed`, `archived`) guarded by a transition validator.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

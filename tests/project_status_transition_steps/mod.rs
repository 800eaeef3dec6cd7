//! Step definitions for project status transition scenarios.

mod then;
mod when;
pub mod world;

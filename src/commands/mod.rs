//! Git command implementations
//!
//! Commands are implemented as methods on [`Repository`](crate::areas::repository::Repository)
//! and write their output to the repository's writer.
//!
//! - `plumbing`: Low-level commands for inspecting the index and the object database

pub mod plumbing;

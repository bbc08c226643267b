//! Core repository components
//!
//! This module contains the fundamental building blocks of a Git repository:
//!
//! - `database`: Loose object store for reading and writing blobs
//! - `index`: Decoder for the staging area (index/cache) file
//! - `repository`: Repository discovery and coordination
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod repository;
pub mod workspace;

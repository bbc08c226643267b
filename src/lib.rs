//! Read-side codecs for git's on-disk formats
//!
//! - [`artifacts::index`]: binary layout of the index (`DIRC` version 2)
//! - [`artifacts::objects`]: blob objects, their digests and zlib storage form
//! - [`areas`]: the repository, its index file, object database, and working tree
//! - [`commands`]: plumbing commands built on the above

pub mod areas;
pub mod artifacts;
pub mod commands;

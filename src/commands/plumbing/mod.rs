//! Plumbing commands (low-level Git operations)
//!
//! Plumbing commands provide direct access to Git's internal data structures
//! and operations. They're primarily used for scripting and debugging.
//!
//! ## Commands
//!
//! - `ls-index`: Print the decoded index header and entries
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Print the content, type, or size of a stored object
//! - `stat-entry`: Print the index entry a file would be staged as

pub mod cat_file;
pub mod hash_object;
pub mod ls_index;
pub mod stat_entry;

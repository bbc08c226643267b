//! Git data structures and codecs
//!
//! - `index`: Index/staging area binary format
//! - `objects`: Git object types (blob) and object IDs

pub mod index;
pub mod objects;

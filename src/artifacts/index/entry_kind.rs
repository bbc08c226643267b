//! Kind of filesystem object an index entry tracks
//!
//! Stored in the 4 high bits of the low half of the mode word. This is not the
//! same thing as [`ObjectType`](crate::artifacts::objects::object_type::ObjectType),
//! which tags stored content.

use std::fs::FileType;

/// Permission bits allowed for a non-executable regular file
pub const REGULAR_PERMISSION: u16 = 0o644;

/// Permission bits allowed for an executable regular file
pub const EXECUTABLE_PERMISSION: u16 = 0o755;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    RegularFile,
    SymbolicLink,
    GitLink,
}

impl EntryKind {
    pub fn bits(self) -> u8 {
        match self {
            EntryKind::RegularFile => 0x8,
            EntryKind::SymbolicLink => 0xA,
            EntryKind::GitLink => 0xE,
        }
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0x8 => Some(EntryKind::RegularFile),
            0xA => Some(EntryKind::SymbolicLink),
            0xE => Some(EntryKind::GitLink),
            _ => None,
        }
    }

    /// Regular files carry `0644` or `0755`; every other kind carries no permission bits.
    pub fn allows_permission(self, permission: u16) -> bool {
        match self {
            EntryKind::RegularFile => {
                permission == REGULAR_PERMISSION || permission == EXECUTABLE_PERMISSION
            }
            _ => permission == 0,
        }
    }

    /// Classify a file from its (non-followed) file type.
    ///
    /// Git links are never produced here: detecting a submodule requires looking
    /// inside the directory, which is left to the caller.
    pub fn from_file_type(file_type: &FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::SymbolicLink
        } else {
            EntryKind::RegularFile
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntryKind::RegularFile => "regular file",
            EntryKind::SymbolicLink => "symbolic link",
            EntryKind::GitLink => "git link",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

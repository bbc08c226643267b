//! Index entry representation
//!
//! Each entry in the index represents a tracked path with:
//! - File path
//! - Content hash (object ID)
//! - File metadata (kind, permission, size, timestamps)
//! - Flags (assume-valid, merge stage)
//!
//! ## Entry Format
//!
//! Entries are 62 fixed bytes followed by the name and 1 to 8 bytes of NUL padding,
//! so that every entry ends on a multiple of 8 counted from the end of the header.
//! Metadata includes both file status (mode, size) and timestamps (mtime, ctime)
//! which enable fast change detection without reading file content.

use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::bit_fields::{split_flags, split_mode};
use crate::artifacts::index::conflict_stage::ConflictStage;
use crate::artifacts::index::entry_kind::EntryKind;
use crate::artifacts::index::error::{IndexError, IndexResult};
use crate::artifacts::index::index_reader::IndexReader;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::io::{Read, Seek};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::prelude::MetadataExt;
use std::path::{Path, PathBuf};

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: u64 = 8;

/// Size of the fixed part of an entry, before the name
pub const ENTRY_FIXED_SIZE: u64 = 62;

/// A timestamp as stored in the index: seconds and nanoseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct EntryTime {
    pub seconds: u32,
    pub nanoseconds: u32,
}

impl std::fmt::Display for EntryTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match chrono::DateTime::from_timestamp(i64::from(self.seconds), self.nanoseconds) {
            Some(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S%.9f UTC")),
            None => write!(f, "{}.{:09}", self.seconds, self.nanoseconds),
        }
    }
}

/// File metadata stored in index entries
///
/// Contains both file status information (kind, permission, size, inode) and timestamps.
/// This metadata enables Git to quickly detect file changes without reading
/// content by comparing stat information.
///
/// ## Timestamps
///
/// - `ctime`: File status change time (inode modification)
/// - `mtime`: File content modification time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub ctime: EntryTime,
    pub mtime: EntryTime,
    /// Device ID
    pub dev: i32,
    /// Inode number
    pub ino: u64,
    pub kind: EntryKind,
    /// Unix permission bits (9 bits)
    pub permission: u16,
    /// User ID of owner
    pub uid: u32,
    /// Group ID of owner
    pub gid: u32,
    /// File size in bytes, truncated to 32 bits
    pub size: u32,
}

impl EntryMetadata {
    /// Check the permission bits against the entry kind.
    pub fn validate(&self) -> IndexResult<()> {
        if !self.kind.allows_permission(self.permission) {
            return Err(IndexError::ForbiddenPermission {
                kind: self.kind,
                permission: self.permission,
            });
        }

        Ok(())
    }
}

impl TryFrom<&Metadata> for EntryMetadata {
    type Error = IndexError;

    /// Sample stat data from metadata obtained without following symlinks.
    ///
    /// Symbolic links are recorded without permission bits, as git does; regular files
    /// keep theirs and must be `0644` or `0755`.
    fn try_from(metadata: &Metadata) -> IndexResult<Self> {
        let kind = EntryKind::from_file_type(&metadata.file_type());
        let permission = match kind {
            EntryKind::RegularFile => (metadata.mode() & 0o777) as u16,
            _ => 0,
        };

        let stat = EntryMetadata {
            ctime: EntryTime::new(metadata.ctime() as u32, metadata.ctime_nsec() as u32),
            mtime: EntryTime::new(metadata.mtime() as u32, metadata.mtime_nsec() as u32),
            dev: metadata.dev() as i32,
            ino: metadata.ino(),
            kind,
            permission,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
        };
        stat.validate()?;

        Ok(stat)
    }
}

/// Index entry representing a tracked path
///
/// Entries are produced by decoding an index file, or built from live stat data
/// paired with the digest of the file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    name: PathBuf,
    oid: ObjectId,
    metadata: EntryMetadata,
    assume_valid: bool,
    stage: ConflictStage,
}

impl IndexEntry {
    /// Build an unconflicted entry, rejecting permission bits that do not fit the kind.
    pub fn try_new(name: PathBuf, oid: ObjectId, metadata: EntryMetadata) -> IndexResult<Self> {
        metadata.validate()?;

        Ok(IndexEntry {
            name,
            oid,
            metadata,
            assume_valid: false,
            stage: ConflictStage::None,
        })
    }

    /// Build an entry for `name` from its `symlink_metadata` and content digest.
    pub fn from_metadata(name: PathBuf, metadata: &Metadata, oid: ObjectId) -> IndexResult<Self> {
        Self::try_new(name, oid, EntryMetadata::try_from(metadata)?)
    }

    /// File path relative to repository root
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// SHA-1 hash of the staged content
    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    pub fn assume_valid(&self) -> bool {
        self.assume_valid
    }

    pub fn stage(&self) -> ConflictStage {
        self.stage
    }

    /// Number of NUL bytes that follow an entry whose name ends at `offset`.
    ///
    /// Always between 1 and [`ENTRY_BLOCK`], counted relative to the end of the header.
    pub fn padding(offset: u64) -> u64 {
        ENTRY_BLOCK - (offset.saturating_sub(HEADER_SIZE) % ENTRY_BLOCK)
    }

    /// Decode one entry at the reader's position and skip its padding.
    ///
    /// A short read anywhere before the end of the name aborts with
    /// [`IndexError::Truncated`]. Running out of input inside the padding is accepted,
    /// since the last entry of a stream may end there.
    pub fn decode<R: Read + Seek>(reader: &mut IndexReader<R>) -> IndexResult<Self> {
        let start = reader.offset();

        let ctime = EntryTime::new(
            reader.read_u32("ctime seconds")?,
            reader.read_u32("ctime nanoseconds")?,
        );
        let mtime = EntryTime::new(
            reader.read_u32("mtime seconds")?,
            reader.read_u32("mtime nanoseconds")?,
        );
        let dev = reader.read_u32("device")? as i32;
        let ino = u64::from(reader.read_u32("inode")?);

        let mode_offset = reader.offset();
        let (permission, kind_bits) = split_mode(reader.read_u32("mode")?);
        let kind = EntryKind::from_bits(kind_bits).ok_or(IndexError::UnknownEntryKind {
            value: kind_bits,
            offset: mode_offset,
        })?;

        let uid = reader.read_u32("uid")?;
        let gid = reader.read_u32("gid")?;
        let size = reader.read_u32("size")?;
        let oid = ObjectId::from(reader.read_array::<20>("digest")?);
        let (assume_valid, stage, name_length) = split_flags(reader.read_u16("flags")?);

        let name_offset = reader.offset();
        let name = reader.read_bytes(usize::from(name_length), "name")?;
        if name.contains(&0) {
            return Err(IndexError::NulInName {
                offset: name_offset,
            });
        }

        let padding = Self::padding(reader.offset());
        let skipped = reader.skip(padding)?;
        if skipped < padding {
            tracing::trace!(offset = reader.offset(), "index ends inside entry padding");
        }

        let name = PathBuf::from(OsStr::from_bytes(&name));
        tracing::trace!(offset = start, name = %name.display(), "decoded index entry");

        Ok(IndexEntry {
            name,
            oid,
            metadata: EntryMetadata {
                ctime,
                mtime,
                dev,
                ino,
                kind,
                permission,
                uid,
                gid,
                size,
            },
            assume_valid,
            stage,
        })
    }
}

impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let metadata = &self.metadata;

        writeln!(f, "{}", self.name.display())?;
        writeln!(f, "  CTime       : {}", metadata.ctime)?;
        writeln!(f, "  MTime       : {}", metadata.mtime)?;
        writeln!(f, "  DeviceID    : {}", metadata.dev)?;
        writeln!(f, "  Inode       : {}", metadata.ino)?;
        writeln!(f, "  Kind        : {}", metadata.kind)?;
        writeln!(f, "  Permission  : {:03o}", metadata.permission)?;
        writeln!(f, "  UserID      : {}", metadata.uid)?;
        writeln!(f, "  GroupID     : {}", metadata.gid)?;
        writeln!(f, "  FileSize    : {}", metadata.size)?;
        writeln!(f, "  SHA1        : {}", self.oid)?;
        writeln!(f, "  AssumeValid : {}", self.assume_valid)?;
        write!(f, "  Stage       : {}", self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::test_support::{EntryFixture, index_bytes};
    use proptest::prelude::*;
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    #[fixture]
    fn oid() -> ObjectId {
        ObjectId::try_parse("e69de29bb2d1d6434b8b29ae775ad8c2e48c5391").unwrap()
    }

    #[fixture]
    fn entry_metadata() -> EntryMetadata {
        EntryMetadata {
            ctime: EntryTime::new(1_700_000_000, 1),
            mtime: EntryTime::new(1_700_000_000, 2),
            dev: 2049,
            ino: 42,
            kind: EntryKind::RegularFile,
            permission: 0o644,
            uid: 1000,
            gid: 1000,
            size: 0,
        }
    }

    fn reader_at_first_entry(bytes: Vec<u8>) -> IndexReader<Cursor<Vec<u8>>> {
        let mut cursor = Cursor::new(bytes);
        cursor.set_position(HEADER_SIZE);
        IndexReader::new(cursor).unwrap()
    }

    #[rstest]
    #[case(12, 8)]
    #[case(13, 7)]
    #[case(19, 1)]
    #[case(20, 8)]
    #[case(12 + 62 + 2, 8)]
    #[case(12 + 62 + 1, 1)]
    #[case(12 + 62 + 6, 4)]
    fn padding_is_never_zero(#[case] offset: u64, #[case] expected: u64) {
        assert_eq!(IndexEntry::padding(offset), expected);
    }

    #[test]
    fn entry_time_displays_as_utc() {
        pretty_assertions::assert_eq!(
            EntryTime::new(1_700_000_000, 5).to_string(),
            "2023-11-14 22:13:20.000000005 UTC"
        );
    }

    #[test]
    fn decode_all_fields() {
        let fixture = EntryFixture {
            ctime: (1, 2),
            mtime: (3, 4),
            dev: 0xFFFF_FFFF,
            ino: 0xFFFF_FFFE,
            mode: 0o100755,
            uid: 501,
            gid: 20,
            size: 1234,
            digest: [0xAB; 20],
            flags: 0x8000 | 0x2000,
            ..EntryFixture::regular("src/lib.rs")
        };
        let mut reader = reader_at_first_entry(index_bytes(2, &[fixture]));

        let entry = IndexEntry::decode(&mut reader).unwrap();

        pretty_assertions::assert_eq!(entry.name(), Path::new("src/lib.rs"));
        pretty_assertions::assert_eq!(
            entry.metadata(),
            &EntryMetadata {
                ctime: EntryTime::new(1, 2),
                mtime: EntryTime::new(3, 4),
                dev: -1,
                ino: 0xFFFF_FFFE,
                kind: EntryKind::RegularFile,
                permission: 0o755,
                uid: 501,
                gid: 20,
                size: 1234,
            }
        );
        assert_eq!(entry.oid().as_bytes(), &[0xAB; 20]);
        assert!(entry.assume_valid());
        assert_eq!(entry.stage(), ConflictStage::Current);
        // 62 fixed bytes + 10 name bytes + 0 already aligned -> 8 bytes of padding
        assert_eq!(reader.offset(), HEADER_SIZE + 80);
    }

    #[test]
    fn decode_symbolic_link_and_git_link() {
        let fixtures = [
            EntryFixture {
                mode: 0o120000,
                ..EntryFixture::regular("link")
            },
            EntryFixture {
                mode: 0o160000,
                ..EntryFixture::regular("submodule")
            },
        ];
        let mut reader = reader_at_first_entry(index_bytes(2, &fixtures));

        let link = IndexEntry::decode(&mut reader).unwrap();
        let submodule = IndexEntry::decode(&mut reader).unwrap();
        assert_eq!(link.metadata().kind, EntryKind::SymbolicLink);
        assert_eq!(submodule.metadata().kind, EntryKind::GitLink);
    }

    #[test]
    fn unknown_kind_names_mode_offset() {
        let fixture = EntryFixture {
            mode: 0o040000,
            ..EntryFixture::regular("dir")
        };
        let mut reader = reader_at_first_entry(index_bytes(2, &[fixture]));

        let error = IndexEntry::decode(&mut reader).unwrap_err();
        assert!(matches!(
            error,
            IndexError::UnknownEntryKind {
                value: 0x4,
                offset: 36
            }
        ));
    }

    #[test]
    fn truncated_name_is_an_error() {
        let mut bytes = index_bytes(2, &[EntryFixture::regular("a-long-file-name.txt")]);
        bytes.truncate(HEADER_SIZE as usize + 62 + 5);
        let mut reader = reader_at_first_entry(bytes);

        let error = IndexEntry::decode(&mut reader).unwrap_err();
        assert!(matches!(
            error,
            IndexError::Truncated {
                field: "name",
                offset: 74
            }
        ));
    }

    #[test]
    fn truncated_fixed_field_is_an_error() {
        let mut bytes = index_bytes(2, &[EntryFixture::regular("file")]);
        bytes.truncate(HEADER_SIZE as usize + 50);
        let mut reader = reader_at_first_entry(bytes);

        let error = IndexEntry::decode(&mut reader).unwrap_err();
        assert!(matches!(
            error,
            IndexError::Truncated {
                field: "digest",
                offset: 52
            }
        ));
    }

    #[test]
    fn missing_padding_at_end_of_stream_is_accepted() {
        let mut bytes = index_bytes(2, &[EntryFixture::regular("file")]);
        bytes.truncate(HEADER_SIZE as usize + 62 + 4);
        let mut reader = reader_at_first_entry(bytes);

        let entry = IndexEntry::decode(&mut reader).unwrap();
        assert_eq!(entry.name(), Path::new("file"));
    }

    #[test]
    fn nul_in_name_is_rejected() {
        let mut fixture = EntryFixture::regular("ab");
        fixture.name = b"a\0".to_vec();
        let mut reader = reader_at_first_entry(index_bytes(2, &[fixture]));

        let error = IndexEntry::decode(&mut reader).unwrap_err();
        assert!(matches!(error, IndexError::NulInName { offset: 74 }));
    }

    #[rstest]
    #[case(EntryKind::RegularFile, 0o644)]
    #[case(EntryKind::RegularFile, 0o755)]
    #[case(EntryKind::SymbolicLink, 0o000)]
    #[case(EntryKind::GitLink, 0o000)]
    fn build_entry_with_allowed_permission(
        oid: ObjectId,
        entry_metadata: EntryMetadata,
        #[case] kind: EntryKind,
        #[case] permission: u16,
    ) {
        let metadata = EntryMetadata {
            kind,
            permission,
            ..entry_metadata
        };

        let entry = IndexEntry::try_new(PathBuf::from("a/b"), oid, metadata).unwrap();
        assert_eq!(entry.stage(), ConflictStage::None);
        assert!(!entry.assume_valid());
    }

    #[rstest]
    #[case(EntryKind::RegularFile, 0o640)]
    #[case(EntryKind::RegularFile, 0o600)]
    #[case(EntryKind::SymbolicLink, 0o777)]
    #[case(EntryKind::GitLink, 0o644)]
    fn reject_entry_with_forbidden_permission(
        oid: ObjectId,
        entry_metadata: EntryMetadata,
        #[case] kind: EntryKind,
        #[case] permission: u16,
    ) {
        let metadata = EntryMetadata {
            kind,
            permission,
            ..entry_metadata
        };

        let error = IndexEntry::try_new(PathBuf::from("a/b"), oid, metadata).unwrap_err();
        assert!(matches!(
            error,
            IndexError::ForbiddenPermission { kind: k, permission: p } if k == kind && p == permission
        ));
    }

    #[rstest]
    fn build_entry_from_file_metadata(oid: ObjectId) {
        use std::os::unix::fs::PermissionsExt;

        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("run.sh");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let metadata = std::fs::symlink_metadata(&path).unwrap();

        let entry =
            IndexEntry::from_metadata(PathBuf::from("run.sh"), &metadata, oid).unwrap();
        assert_eq!(entry.metadata().kind, EntryKind::RegularFile);
        assert_eq!(entry.metadata().permission, 0o755);
        assert_eq!(entry.metadata().size, 10);
        assert_eq!(entry.metadata().ino, metadata.ino());

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();
        let metadata = std::fs::symlink_metadata(&path).unwrap();
        assert!(IndexEntry::from_metadata(PathBuf::from("run.sh"), &metadata, oid).is_err());
    }

    #[rstest]
    fn symbolic_link_metadata_has_no_permission(oid: ObjectId) {
        let dir = assert_fs::TempDir::new().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");
        std::fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let metadata = std::fs::symlink_metadata(&link).unwrap();

        let entry = IndexEntry::from_metadata(PathBuf::from("link"), &metadata, oid).unwrap();
        assert_eq!(entry.metadata().kind, EntryKind::SymbolicLink);
        assert_eq!(entry.metadata().permission, 0);
    }

    proptest! {
        #[test]
        fn entries_start_on_eight_byte_boundaries(name_lengths in proptest::collection::vec(0usize..300, 1..12)) {
            let fixtures = name_lengths
                .iter()
                .map(|len| {
                    let mut fixture = EntryFixture::regular("x");
                    fixture.name = vec![b'n'; *len];
                    fixture
                })
                .collect::<Vec<_>>();
            let mut reader = reader_at_first_entry(index_bytes(2, &fixtures));

            for len in &name_lengths {
                let start = reader.offset();
                IndexEntry::decode(&mut reader).unwrap();
                let advance = reader.offset() - start;

                prop_assert_eq!(advance % ENTRY_BLOCK, 0);
                prop_assert!(advance > ENTRY_FIXED_SIZE + *len as u64);
                prop_assert!(advance <= ENTRY_FIXED_SIZE + *len as u64 + ENTRY_BLOCK);
            }
        }
    }
}

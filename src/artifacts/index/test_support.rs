//! Byte-level builders for index fixtures

use crate::artifacts::index::SIGNATURE;
use crate::artifacts::index::bit_fields::NAME_LENGTH_MASK;
use byteorder::{NetworkEndian, WriteBytesExt};

/// Raw field values of one entry, written exactly as given
#[derive(Debug, Clone)]
pub(crate) struct EntryFixture {
    pub ctime: (u32, u32),
    pub mtime: (u32, u32),
    pub dev: u32,
    pub ino: u32,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
    pub digest: [u8; 20],
    /// Flag bits above the name length (stage, reserved, assume-valid)
    pub flags: u16,
    pub name: Vec<u8>,
}

impl EntryFixture {
    pub fn regular(name: &str) -> Self {
        EntryFixture {
            ctime: (1_700_000_000, 0),
            mtime: (1_700_000_000, 0),
            dev: 2049,
            ino: 1,
            mode: 0o100644,
            uid: 1000,
            gid: 1000,
            size: 0,
            digest: [0; 20],
            flags: 0,
            name: name.as_bytes().to_vec(),
        }
    }

    /// Append the entry and its padding to `out`, which must start with the header.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.write_u32::<NetworkEndian>(self.ctime.0).unwrap();
        out.write_u32::<NetworkEndian>(self.ctime.1).unwrap();
        out.write_u32::<NetworkEndian>(self.mtime.0).unwrap();
        out.write_u32::<NetworkEndian>(self.mtime.1).unwrap();
        out.write_u32::<NetworkEndian>(self.dev).unwrap();
        out.write_u32::<NetworkEndian>(self.ino).unwrap();
        out.write_u32::<NetworkEndian>(self.mode).unwrap();
        out.write_u32::<NetworkEndian>(self.uid).unwrap();
        out.write_u32::<NetworkEndian>(self.gid).unwrap();
        out.write_u32::<NetworkEndian>(self.size).unwrap();
        out.extend_from_slice(&self.digest);
        let name_length = self.name.len().min(usize::from(NAME_LENGTH_MASK)) as u16;
        out.write_u16::<NetworkEndian>(self.flags | name_length).unwrap();
        out.extend_from_slice(&self.name);

        // at least one NUL, then fill to the next multiple of 8 past the header
        out.push(0);
        while (out.len() - 12) % 8 != 0 {
            out.push(0);
        }
    }
}

pub(crate) fn header_bytes(version: u32, entry_count: u32) -> Vec<u8> {
    let mut out = SIGNATURE.to_vec();
    out.write_u32::<NetworkEndian>(version).unwrap();
    out.write_u32::<NetworkEndian>(entry_count).unwrap();
    out
}

pub(crate) fn index_bytes(version: u32, entries: &[EntryFixture]) -> Vec<u8> {
    let mut out = header_bytes(version, entries.len() as u32);
    for entry in entries {
        entry.write_to(&mut out);
    }
    out
}

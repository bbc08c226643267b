#![allow(dead_code)]

use assert_fs::TempDir;
use assert_fs::prelude::PathCreateDir;
use assert_fs::fixture::PathChild;
use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

/// Create an empty repository layout (`.git/objects`) inside a fresh temp dir.
pub fn init_repository() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    dir.child(".git")
        .child("objects")
        .create_dir_all()
        .expect("Failed to create .git/objects");
    dir
}

/// Raw field values of one index entry
pub struct RawEntry {
    pub name: &'static str,
    pub mode: u32,
    pub size: u32,
    pub digest: [u8; 20],
    /// Flag bits above the 12-bit name length
    pub flags: u16,
}

impl RawEntry {
    pub fn regular(name: &'static str) -> Self {
        RawEntry {
            name,
            mode: 0o100644,
            size: 0,
            digest: [0; 20],
            flags: 0,
        }
    }
}

/// Assemble a version-2 index file, padding each entry to 8 bytes past the header.
pub fn index_bytes(version: u32, entries: &[RawEntry]) -> Vec<u8> {
    let mut out = b"DIRC".to_vec();
    out.write_u32::<NetworkEndian>(version).unwrap();
    out.write_u32::<NetworkEndian>(entries.len() as u32).unwrap();

    for entry in entries {
        // ctime, mtime
        for _ in 0..4 {
            out.write_u32::<NetworkEndian>(1_700_000_000).unwrap();
        }
        // dev, ino
        out.write_u32::<NetworkEndian>(2049).unwrap();
        out.write_u32::<NetworkEndian>(42).unwrap();
        out.write_u32::<NetworkEndian>(entry.mode).unwrap();
        // uid, gid
        out.write_u32::<NetworkEndian>(1000).unwrap();
        out.write_u32::<NetworkEndian>(1000).unwrap();
        out.write_u32::<NetworkEndian>(entry.size).unwrap();
        out.write_all(&entry.digest).unwrap();
        let flags = entry.flags | (entry.name.len().min(0xFFF) as u16);
        out.write_u16::<NetworkEndian>(flags).unwrap();
        out.write_all(entry.name.as_bytes()).unwrap();

        out.push(0);
        while (out.len() - 12) % 8 != 0 {
            out.push(0);
        }
    }

    out
}

// Helper function to create hexdump representation
pub fn to_hexdump(data: &[u8]) -> String {
    let mut result = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        result.push_str(&format!("{:08x}: ", i * 16));

        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                result.push(' ');
            }
            result.push_str(&format!("{:02x} ", byte));
        }

        for j in chunk.len()..16 {
            if j == 8 {
                result.push(' ');
            }
            result.push_str("   ");
        }

        result.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() {
                result.push(*byte as char);
            } else {
                result.push('.');
            }
        }

        result.push_str("|\n");
    }
    result
}

// Macro to compare raw bytes with hexdump output on failure
#[macro_export]
macro_rules! assert_bytes_eq {
    ($actual:expr, $expected:expr) => {
        if $actual != $expected {
            pretty_assertions::assert_eq!(
                common::to_hexdump($actual),
                common::to_hexdump($expected),
                "\n=== CONTENTS DIFFER ===\nactual ({} bytes) vs expected ({} bytes)",
                $actual.len(),
                $expected.len()
            );
        }
    };
}

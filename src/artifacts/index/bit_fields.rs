//! Packing of the mode and flags words of an index entry
//!
//! ```text
//! mode (32 bit):   | 31 .. 16 unused | 15 .. 12 kind | 11 .. 9 unused | 8 .. 0 permission |
//! flags (16 bit):  | 15 assume-valid | 14 reserved | 13 .. 12 stage | 11 .. 0 name length |
//! ```
//!
//! Splitting never validates: unused and reserved bits are dropped, and the
//! meaning of the extracted fields is checked by the caller.

use crate::artifacts::index::conflict_stage::ConflictStage;

const PERMISSION_MASK: u32 = 0x1FF;
const KIND_SHIFT: u32 = 12;
const KIND_MASK: u32 = 0xF;

/// Largest name length representable in the flags word
pub const NAME_LENGTH_MASK: u16 = 0xFFF;
const STAGE_SHIFT: u16 = 12;
const STAGE_MASK: u16 = 0x3;
const ASSUME_VALID_BIT: u16 = 1 << 15;

/// Split a mode word into `(permission, kind bits)`.
pub fn split_mode(word: u32) -> (u16, u8) {
    let permission = (word & PERMISSION_MASK) as u16;
    let kind = ((word >> KIND_SHIFT) & KIND_MASK) as u8;

    (permission, kind)
}

pub fn join_mode(permission: u16, kind: u8) -> u32 {
    ((u32::from(kind) & KIND_MASK) << KIND_SHIFT) | (u32::from(permission) & PERMISSION_MASK)
}

/// Split a flags word into `(assume valid, stage, name length)`.
pub fn split_flags(word: u16) -> (bool, ConflictStage, u16) {
    let name_length = word & NAME_LENGTH_MASK;
    let stage = ConflictStage::from_bits(((word >> STAGE_SHIFT) & STAGE_MASK) as u8);
    let assume_valid = word & ASSUME_VALID_BIT != 0;

    (assume_valid, stage, name_length)
}

/// Names longer than [`NAME_LENGTH_MASK`] are recorded as exactly that value.
pub fn join_flags(assume_valid: bool, stage: ConflictStage, name_length: usize) -> u16 {
    let name_length = name_length.min(usize::from(NAME_LENGTH_MASK)) as u16;
    let stage = (u16::from(stage.bits()) & STAGE_MASK) << STAGE_SHIFT;
    let assume_valid = if assume_valid { ASSUME_VALID_BIT } else { 0 };

    assume_valid | stage | name_length
}

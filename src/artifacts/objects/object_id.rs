//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are held as the raw 20-byte digest and rendered as 40 lowercase
//! hexadecimal characters.
//!
//! ## Storage
//!
//! Objects are stored in `<objects>/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use crate::artifacts::objects::{DIGEST_SIZE, OBJECT_ID_LENGTH};
use std::path::PathBuf;
use std::str::FromStr;

/// Git object identifier (SHA-1 hash)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; DIGEST_SIZE]);

impl ObjectId {
    /// Build an object ID from a raw digest
    ///
    /// # Returns
    ///
    /// Error if `bytes` is not exactly 20 bytes long
    pub fn try_from_slice(bytes: &[u8]) -> ObjectResult<Self> {
        let digest: [u8; DIGEST_SIZE] = bytes
            .try_into()
            .map_err(|_| ObjectError::InvalidDigestLength(bytes.len()))?;

        Ok(Self(digest))
    }

    /// Parse and validate an object ID from its 40-character hex form
    pub fn try_parse(id: &str) -> ObjectResult<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(ObjectError::InvalidHex(id.to_string()));
        }

        let mut digest = [0u8; DIGEST_SIZE];
        hex::decode_to_slice(id, &mut digest)
            .map_err(|_| ObjectError::InvalidHex(id.to_string()))?;

        Ok(Self(digest))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl From<[u8; DIGEST_SIZE]> for ObjectId {
    fn from(digest: [u8; DIGEST_SIZE]) -> Self {
        Self(digest)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = ObjectError;

    fn try_from(bytes: &[u8]) -> ObjectResult<Self> {
        Self::try_from_slice(bytes)
    }
}

impl FromStr for ObjectId {
    type Err = ObjectError;

    fn from_str(s: &str) -> ObjectResult<Self> {
        Self::try_parse(s)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

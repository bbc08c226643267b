use crate::artifacts::objects::error::{ObjectError, ObjectResult};
use std::io::BufRead;

/// Kind of stored content, as named in an object header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
            ObjectType::Tag => "tag",
        }
    }

    /// Read a `<type> <size>\0` header, leaving the reader at the first content byte.
    pub fn parse_header(data_reader: &mut impl BufRead) -> ObjectResult<(ObjectType, u64)> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;
        if object_type.pop() != Some(b' ') {
            return Err(ObjectError::MalformedHeader(
                "missing separator after object type".to_string(),
            ));
        }

        let object_type = String::from_utf8(object_type)
            .map_err(|_| ObjectError::MalformedHeader("object type is not UTF-8".to_string()))?;
        let object_type = ObjectType::try_from(object_type.as_str())?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            return Err(ObjectError::MalformedHeader(
                "missing NUL after object size".to_string(),
            ));
        }

        let size = std::str::from_utf8(&size)
            .ok()
            .and_then(|size| size.parse::<u64>().ok())
            .ok_or_else(|| {
                ObjectError::MalformedHeader(format!(
                    "invalid object size {:?}",
                    String::from_utf8_lossy(&size)
                ))
            })?;

        Ok((object_type, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = ObjectError;

    fn try_from(value: &str) -> ObjectResult<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            "tag" => Ok(ObjectType::Tag),
            _ => Err(ObjectError::UnknownType(value.to_string())),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

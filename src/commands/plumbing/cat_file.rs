use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Raw content
    Pretty,
    Type,
    Size,
}

impl Repository {
    pub fn cat_file(&self, object_id: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id)?;

        let object = self
            .database()
            .read_object(&object_id)
            .with_context(|| format!("Unable to read object {object_id}"))?;

        match &object {
            ObjectBox::Blob(blob) => match mode {
                CatFileMode::Pretty => self.writer().write_all(&blob.content()?)?,
                CatFileMode::Type => writeln!(self.writer(), "{}", object.as_object().object_type())?,
                CatFileMode::Size => writeln!(self.writer(), "{}", blob.size())?,
            },
        }
        object.close();

        Ok(())
    }
}

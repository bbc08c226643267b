use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, object_path: &Path, write: bool) -> anyhow::Result<()> {
        let object = self.workspace().parse_blob(object_path)?;

        let object_id = object.object_id()?;
        writeln!(self.writer(), "{object_id}")?;

        // write (if write is true) as compressed object file
        if write {
            self.database().store(&object)?;
        }
        object.close();

        Ok(())
    }
}

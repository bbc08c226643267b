use crate::areas::repository::Repository;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the index entry `file_path` would be staged as.
    pub fn stat_entry(&self, file_path: &Path) -> anyhow::Result<()> {
        let entry = self.workspace().stat_entry(file_path)?;
        writeln!(self.writer(), "{entry}")?;

        Ok(())
    }
}

use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the index header and every entry, or only the entry at `position`.
    pub fn ls_index(&self, position: Option<usize>) -> anyhow::Result<()> {
        let index = self.load_index()?;

        match position {
            Some(position) => {
                let entry = index.entry_at(position)?;
                writeln!(self.writer(), "{entry}")?;
            }
            None => {
                writeln!(self.writer(), "{index}")?;
            }
        }

        Ok(())
    }
}

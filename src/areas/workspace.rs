use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use std::fs::File;
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

/// Working tree rooted at the repository directory
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open `path` (absolute, or relative to the working tree) as a blob.
    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let file_path = self.path.join(path);

        Blob::from_path(&file_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))
    }

    /// Build the index entry `path` would be staged as.
    ///
    /// The entry is named relative to the working tree root. A regular file is
    /// hashed and stat'ed through one open handle, so digest and stat data describe
    /// the same file. A symbolic link is described by its own metadata and hashed
    /// as its target text, whether or not the target exists.
    pub fn stat_entry(&self, path: &Path) -> anyhow::Result<IndexEntry> {
        let file_path = self.path.join(path);
        let name = self.relative_path(&file_path)?;

        let link_metadata = std::fs::symlink_metadata(&file_path)
            .with_context(|| format!("Unable to stat file {}", file_path.display()))?;
        if link_metadata.is_dir() {
            anyhow::bail!("{} is a directory", file_path.display());
        }

        let (oid, metadata) = if link_metadata.file_type().is_symlink() {
            let target = std::fs::read_link(&file_path)
                .with_context(|| format!("Unable to read link {}", file_path.display()))?;
            let blob = Blob::from_bytes(target.into_os_string().into_vec());

            (blob.object_id()?, link_metadata)
        } else {
            let file = File::open(&file_path)
                .with_context(|| format!("Unable to read file {}", file_path.display()))?;
            let metadata = file
                .metadata()
                .with_context(|| format!("Unable to stat file {}", file_path.display()))?;
            let blob = Blob::from_file(file, &metadata);
            let oid = blob.object_id()?;
            blob.close();

            (oid, metadata)
        };

        IndexEntry::from_metadata(name, &metadata, oid)
            .with_context(|| format!("Unable to describe {} as an index entry", path.display()))
    }

    fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        // resolve the parent only, a symlink itself must stay unresolved
        let path = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => parent
                .canonicalize()
                .map(|parent| parent.join(name))
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => path.to_path_buf(),
        };

        match path.strip_prefix(&self.path) {
            Ok(relative) if !relative.as_os_str().is_empty() => Ok(relative.to_path_buf()),
            _ => anyhow::bail!(
                "{} is outside repository at {}",
                path.display(),
                self.path.display()
            ),
        }
    }
}

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

const GIT_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
}

impl Repository {
    /// Open the repository whose working tree is rooted at `path`.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to open repository at {}", path.display()))?;

        let database = Database::new(path.join(GIT_DIR).join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
        })
    }

    /// Walk up from `start` to the nearest directory containing a `.git` directory.
    pub fn find_root(start: &Path) -> anyhow::Result<PathBuf> {
        let start = start
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", start.display()))?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(GIT_DIR).is_dir())
            .map(Path::to_path_buf);

        match root {
            Some(root) => {
                tracing::debug!(root = %root.display(), "found repository root");
                Ok(root)
            }
            None => anyhow::bail!(
                "not a git repository (or any of the parent directories): {}",
                start.display()
            ),
        }
    }

    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let root = Self::find_root(start)?;
        Self::new(&root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> PathBuf {
        self.path.join(GIT_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.git_path().join("index")
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn load_index(&self) -> anyhow::Result<Index> {
        let index_path = self.index_path();

        Index::load(&index_path)
            .with_context(|| format!("Unable to read index file {}", index_path.display()))
    }
}

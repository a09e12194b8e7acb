use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// Ordered set of directories and files to materialize under a root.
///
/// Produced by the template store and the layout definitions, consumed once
/// by the synthesizer. Entries keep insertion order so directories declared
/// first are created before the files that live in them.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    pub(crate) entries: Vec<FsEntry>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        perms: Permissions,
    ) -> Result<(), DomainError> {
        self.entries.push(FsEntry::File(FileToWrite {
            path: RelativePath::try_new(path)?,
            content: content.into(),
            permissions: perms,
        }));
        Ok(())
    }

    pub fn add_directory(&mut self, path: impl Into<PathBuf>) -> Result<(), DomainError> {
        self.entries.push(FsEntry::Directory(DirectoryToCreate {
            path: RelativePath::try_new(path)?,
        }));
        Ok(())
    }

    pub fn with_file(
        mut self,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.add_file(path, content, Permissions::read_write())?;
        Ok(self)
    }

    /// Check the set-level invariants: non-empty and no duplicate paths.
    ///
    /// Per-path containment is already guaranteed by [`RelativePath`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::EmptyFileSet);
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let path = entry.path();
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.display().to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            _ => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            _ => None,
        })
    }

    /// Content of the file entry at `path`, if any.
    pub fn content_of(&self, path: impl AsRef<Path>) -> Option<&str> {
        let path = path.as_ref();
        self.files()
            .find(|f| f.path.as_path() == path)
            .map(|f| f.content.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(f) => f.path.as_path(),
            Self::Directory(d) => d.path.as_path(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

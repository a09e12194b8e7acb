//! Materializes a [`FileSet`] under a root directory.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{FileSet, FsEntry},
    error::StrataResult,
};

/// Writes file sets through the [`Filesystem`] port.
///
/// Existing files at the listed paths are overwritten; nothing else under
/// the root is touched or removed.
pub struct FileSynthesizer<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> FileSynthesizer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    #[instrument(skip_all, fields(root = %root.display(), entries = set.len()))]
    pub fn materialize(&self, root: &Path, set: &FileSet) -> StrataResult<()> {
        set.validate()?;
        self.filesystem.create_dir_all(root)?;

        for entry in set.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(&dir.path))?;
                }
                FsEntry::File(file) => {
                    let path = root.join(&file.path);
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                    debug!(path = %file.path, "wrote file");
                }
            }
        }

        Ok(())
    }
}

//! Local filesystem adapter over `std::fs`.

use std::io;
use std::path::Path;

use strata_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StrataError, StrataResult},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StrataResult<()> {
        std::fs::create_dir_all(path).map_err(|e| io_failure(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()> {
        std::fs::write(path, content).map_err(|e| io_failure(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> StrataResult<String> {
        std::fs::read_to_string(path).map_err(|e| io_failure(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> StrataResult<()> {
        std::fs::remove_file(path).map_err(|e| io_failure(path, e, "remove file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> StrataResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = std::fs::metadata(path)
                .map_err(|e| io_failure(path, e, "read metadata"))?
                .permissions();
            let mode = perms.mode();
            perms.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
            std::fs::set_permissions(path, perms)
                .map_err(|e| io_failure(path, e, "set permissions"))?;
        }
        #[cfg(not(unix))]
        {
            // no executable bit; the script is run through its interpreter
            let _ = (path, executable);
        }
        Ok(())
    }
}

fn io_failure(path: &Path, e: io::Error, operation: &str) -> StrataError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_read_and_remove() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("config/settings/base.py");

        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write_file(&path, "DEBUG = True\n").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "DEBUG = True\n");

        fs.write_file(&path, "DEBUG = False\n").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "DEBUG = False\n");

        fs.remove_file(&path).unwrap();
        assert!(!fs.exists(&path));
    }

    #[test]
    fn io_errors_carry_the_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.py");

        let err = LocalFilesystem::new().read_to_string(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.py"));
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn executable_bit_is_set() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("create-module");
        let fs = LocalFilesystem::new();
        fs.write_file(&script, "#!/bin/sh\n").unwrap();
        fs.set_permissions(&script, true).unwrap();

        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

//! Driven (output) ports, implemented by `strata-adapters`.

use std::path::Path;

use crate::domain::{FileSet, ModuleName, ProjectSpec, SecretKey};
use crate::error::StrataResult;

/// Filesystem operations the services need.
///
/// Implemented by:
/// - `strata_adapters::filesystem::LocalFilesystem` (production)
/// - `strata_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StrataResult<()>;

    /// Write `content`, replacing any existing file.
    fn write_file(&self, path: &Path, content: &str) -> StrataResult<()>;

    fn read_to_string(&self, path: &Path) -> StrataResult<String>;

    fn exists(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> StrataResult<()>;

    fn set_permissions(&self, path: &Path, executable: bool) -> StrataResult<()>;
}

/// Which framework skeleton to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonKind {
    /// `startproject config <root>`
    Project,
    /// `startapp <name> <root>/modules/<name>`
    Module(ModuleName),
}

/// The framework's own project-template command.
///
/// Exit status is the only success signal; failures surface as
/// `ApplicationError::ExternalToolFailure`.
#[cfg_attr(test, mockall::automock)]
pub trait SkeletonGenerator: Send + Sync {
    fn generate(&self, kind: &SkeletonKind, project_root: &Path) -> StrataResult<()>;
}

/// Creates isolated dependency environments and installs into them.
#[cfg_attr(test, mockall::automock)]
pub trait EnvironmentProvisioner: Send + Sync {
    fn create_environment(&self, env_dir: &Path) -> StrataResult<()>;

    /// Install the packages listed in `manifest` using the environment's
    /// installer at `installer`.
    fn install_dependencies(&self, installer: &Path, manifest: &Path) -> StrataResult<()>;
}

/// Source of project secrets.
#[cfg_attr(test, mockall::automock)]
pub trait SecretSource: Send + Sync {
    fn generate(&self) -> SecretKey;
}

/// File contents for every generated artifact, keyed by path relative to the
/// directory they are written into.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Manifest, ignore file, environment file, and layered settings.
    fn project_files(&self, spec: &ProjectSpec) -> StrataResult<FileSet>;

    /// Editor settings pointing at the project environment.
    fn editor_files(&self, spec: &ProjectSpec) -> StrataResult<FileSet>;

    /// Default sources written into a fresh module directory.
    fn module_files(&self, name: &ModuleName) -> StrataResult<FileSet>;

    /// Executable `scripts/create-module` wrapper.
    fn driver_script(&self) -> StrataResult<FileSet>;
}

//! Pure domain layer.
//!
//! No I/O happens here. Names are validated, file sets and layouts are
//! described, and settings text is patched in memory. Everything that
//! touches the outside world goes through the ports in
//! [`crate::application::ports`].

pub mod entities;
pub mod error;
pub mod registry;
pub mod rewrite;
pub mod value_objects;

pub use entities::{
    DirectoryToCreate, FileSet, FileToWrite, FsEntry, ModuleLayout, Permissions, ProjectLayout,
    ProjectSpec, RelativePath, RenderContext, settings_module, venv_executable,
};
pub use entities::layout::{CONFIG_PACKAGE, ENTRY_POINTS, PROJECT_FOLDERS};
pub use error::{DomainError, ErrorCategory};
pub use registry::{Registration, RegistrationOutcome, RegistryList, register};
pub use rewrite::{LiteralRewrite, RewriteOutcome, RewriteResult};
pub use value_objects::{Environment, ModuleName, ProjectName, SecretKey};

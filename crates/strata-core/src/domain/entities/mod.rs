pub mod common;
pub mod file_set;
pub mod layout;
pub mod project_spec;
pub mod render_context;

pub use crate::domain::DomainError;
pub use common::{Permissions, RelativePath};
pub use file_set::{DirectoryToCreate, FileSet, FileToWrite, FsEntry};
pub use layout::{ModuleLayout, ProjectLayout, settings_module, venv_executable};
pub use project_spec::ProjectSpec;
pub use render_context::RenderContext;

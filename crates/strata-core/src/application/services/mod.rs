//! Use-case services.

mod bootstrap;
mod module_service;
mod patch;
mod project_service;
mod synthesizer;

pub use bootstrap::EnvironmentBootstrapper;
pub use module_service::{ModuleReport, ModuleService, RegistryUpdate};
pub use project_service::{DriverScriptStatus, EntryPointReport, ProjectReport, ProjectService};
pub use synthesizer::FileSynthesizer;

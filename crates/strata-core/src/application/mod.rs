//! Application layer for Strata.
//!
//! - **Services**: the project orchestrator, the module generator, and the
//!   synthesizer and bootstrapper they compose
//! - **Ports**: traits for everything outside the process
//! - **Errors**: orchestration failures
//!
//! Rules about names, layouts and settings text live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DriverScriptStatus, EntryPointReport, EnvironmentBootstrapper, FileSynthesizer, ModuleReport,
    ModuleService, ProjectReport, ProjectService, RegistryUpdate,
};

pub use ports::{
    EnvironmentProvisioner, Filesystem, SecretSource, SkeletonGenerator, SkeletonKind,
    TemplateStore,
};

pub use error::ApplicationError;

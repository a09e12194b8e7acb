//! Infrastructure adapters for Strata.
//!
//! Implements the ports in `strata_core::application::ports`. All process
//! spawning and disk access lives here.

pub mod builtin_templates;
pub mod django;
pub mod filesystem;
pub mod process;
pub mod secret;
pub mod venv;

pub use builtin_templates::BuiltinTemplates;
pub use django::DjangoGenerator;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use secret::OsSecretSource;
pub use venv::VenvProvisioner;

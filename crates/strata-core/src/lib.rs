//! Strata Core
//!
//! Domain and application layers of the `strata` project scaffolder.
//!
//! ```text
//!   strata-cli ──calls──▶ ProjectService / ModuleService
//!                               │ uses
//!                               ▼
//!                  ports: Filesystem, TemplateStore,
//!                  SkeletonGenerator, EnvironmentProvisioner,
//!                  SecretSource
//!                               ▲ implemented by
//!                               │
//!                        strata-adapters
//!
//!   domain: names, layouts, file sets, registry, literal rewrites
//! ```
//!
//! The registration engine is usable on its own:
//!
//! ```rust
//! use strata_core::domain::{register, RegistrationOutcome};
//!
//! let settings = "INSTALLED_APPS = [\n    'rest_framework',\n]\n";
//! let result = register(settings, "modules.orders");
//!
//! assert_eq!(result.outcome, RegistrationOutcome::Inserted);
//! assert!(result.document.contains("    'modules.orders',\n]"));
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        ModuleReport, ModuleService, ProjectReport, ProjectService, RegistryUpdate,
        ports::{EnvironmentProvisioner, Filesystem, SecretSource, SkeletonGenerator, TemplateStore},
    };
    pub use crate::domain::{
        Environment, FileSet, ModuleName, ProjectName, ProjectSpec, RegistrationOutcome,
        RewriteOutcome, SecretKey, register,
    };
    pub use crate::error::{StrataError, StrataResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

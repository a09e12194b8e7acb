//! Application ports (traits) for external dependencies.
//!
//! All ports here are driven: the services call them and `strata-adapters`
//! implements them. The CLI is the only driver and calls services directly.

pub mod output;

pub use output::{
    EnvironmentProvisioner, Filesystem, SecretSource, SkeletonGenerator, SkeletonKind,
    TemplateStore,
};

#[cfg(test)]
pub use output::{
    MockEnvironmentProvisioner, MockFilesystem, MockSecretSource, MockSkeletonGenerator,
    MockTemplateStore,
};

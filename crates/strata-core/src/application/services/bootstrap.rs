use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{EnvironmentProvisioner, Filesystem},
    },
    domain::ProjectLayout,
    error::StrataResult,
};

/// Creates the project's isolated environment and installs the manifest.
///
/// Every failure is returned as-is; nothing is retried or cleaned up.
pub struct EnvironmentBootstrapper<'a> {
    provisioner: &'a dyn EnvironmentProvisioner,
    filesystem: &'a dyn Filesystem,
}

impl<'a> EnvironmentBootstrapper<'a> {
    pub fn new(provisioner: &'a dyn EnvironmentProvisioner, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            provisioner,
            filesystem,
        }
    }

    #[instrument(skip_all, fields(root = %layout.root().display()))]
    pub fn bootstrap(&self, layout: &ProjectLayout) -> StrataResult<()> {
        let env_dir = layout.venv_dir();
        self.provisioner.create_environment(&env_dir)?;

        for executable in [layout.venv_pip(), layout.venv_python()] {
            if !self.filesystem.exists(&executable) {
                return Err(ApplicationError::EnvironmentIncomplete {
                    path: env_dir,
                    reason: format!("{} not found", executable.display()),
                }
                .into());
            }
        }

        self.provisioner
            .install_dependencies(&layout.venv_pip(), &layout.manifest())?;

        info!(env = %env_dir.display(), "environment ready");
        Ok(())
    }
}

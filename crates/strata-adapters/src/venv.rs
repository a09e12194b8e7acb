//! Isolated dependency environments via `python -m venv` and `pip`.

use std::path::Path;
use std::process::Command;

use tracing::{info, instrument};

use strata_core::{application::ports::EnvironmentProvisioner, error::StrataResult};

use crate::process::run_tool;

#[derive(Debug, Clone)]
pub struct VenvProvisioner {
    python: String,
}

impl VenvProvisioner {
    /// `python` is the interpreter used to create environments.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl Default for VenvProvisioner {
    fn default() -> Self {
        Self::new(if cfg!(windows) { "python" } else { "python3" })
    }
}

impl EnvironmentProvisioner for VenvProvisioner {
    #[instrument(skip(self), fields(python = %self.python))]
    fn create_environment(&self, env_dir: &Path) -> StrataResult<()> {
        let mut cmd = Command::new(&self.python);
        cmd.args(["-m", "venv"]).arg(env_dir);
        run_tool("python -m venv", cmd)?;
        info!(env = %env_dir.display(), "environment created");
        Ok(())
    }

    #[instrument(skip(self))]
    fn install_dependencies(&self, installer: &Path, manifest: &Path) -> StrataResult<()> {
        let mut cmd = Command::new(installer);
        cmd.args(["install", "-r"]).arg(manifest);
        if let Some(root) = manifest.parent() {
            cmd.current_dir(root);
        }
        run_tool("pip install", cmd)?;
        info!("dependencies installed");
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_interpreter_is_a_tool_failure() {
        let dir = TempDir::new().unwrap();
        let err = VenvProvisioner::new("strata-no-such-python")
            .create_environment(&dir.path().join(".venv"))
            .unwrap_err();
        assert!(err.to_string().starts_with("python -m venv failed"));
    }

    #[test]
    fn installer_failure_carries_exit_code() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("requirements.txt");
        std::fs::write(&manifest, "Django\n").unwrap();

        let err = VenvProvisioner::default()
            .install_dependencies(Path::new("false"), &manifest)
            .unwrap_err();
        assert!(err.to_string().contains("exit code 1"));
    }
}

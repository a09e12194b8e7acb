//! Framework skeleton generator backed by Django's own commands.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, instrument};

use strata_core::{
    application::ports::{SkeletonGenerator, SkeletonKind},
    domain::{CONFIG_PACKAGE, ProjectLayout},
    error::{Context, StrataResult},
};

use crate::process::run_tool;

/// Runs `startproject` and `startapp`.
///
/// `startproject` always goes through the project environment's
/// interpreter (`python -m django`). `startapp` does too when that
/// interpreter exists and `prefer_project_env` is set; otherwise it falls
/// back to the configured `django-admin`.
#[derive(Debug, Clone)]
pub struct DjangoGenerator {
    django_admin: String,
    prefer_project_env: bool,
}

impl DjangoGenerator {
    pub fn new(django_admin: impl Into<String>, prefer_project_env: bool) -> Self {
        Self {
            django_admin: django_admin.into(),
            prefer_project_env,
        }
    }

    /// Build the command without running it.
    ///
    /// The child runs inside `project_root`, so every path handed to it is
    /// derived from the root as given; pass an absolute root.
    pub fn command(&self, kind: &SkeletonKind, project_root: &Path) -> Command {
        let layout = ProjectLayout::new(project_root);

        let mut cmd = match kind {
            SkeletonKind::Project => {
                let mut cmd = Command::new(layout.venv_python());
                cmd.args(["-m", "django", "startproject", CONFIG_PACKAGE])
                    .arg(project_root);
                cmd
            }
            SkeletonKind::Module(name) => {
                let mut cmd = match self.module_interpreter(&layout) {
                    Some(python) => {
                        let mut cmd = Command::new(python);
                        cmd.args(["-m", "django"]);
                        cmd
                    }
                    None => Command::new(&self.django_admin),
                };
                cmd.args(["startapp", name.as_str()])
                    .arg(layout.module_dir(name));
                cmd
            }
        };
        cmd.current_dir(project_root);
        cmd
    }

    fn module_interpreter(&self, layout: &ProjectLayout) -> Option<PathBuf> {
        let python = layout.venv_python();
        (self.prefer_project_env && python.exists()).then_some(python)
    }
}

impl Default for DjangoGenerator {
    fn default() -> Self {
        Self::new("django-admin", true)
    }
}

impl SkeletonGenerator for DjangoGenerator {
    #[instrument(skip(self), fields(root = %project_root.display()))]
    fn generate(&self, kind: &SkeletonKind, project_root: &Path) -> StrataResult<()> {
        let label = match kind {
            SkeletonKind::Project => "django startproject",
            SkeletonKind::Module(_) => "django startapp",
        };
        let root = std::path::absolute(project_root).context("resolve project root")?;
        run_tool(label, self.command(kind, &root))?;
        info!(?kind, "skeleton generated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::domain::ModuleName;
    use tempfile::TempDir;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn startproject_uses_environment_interpreter() {
        let cmd = DjangoGenerator::default().command(&SkeletonKind::Project, Path::new("/w/demo"));

        assert_eq!(
            PathBuf::from(cmd.get_program()),
            ProjectLayout::new("/w/demo").venv_python()
        );
        assert_eq!(
            args(&cmd),
            ["-m", "django", "startproject", "config", "/w/demo"]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/w/demo")));
    }

    #[test]
    fn startapp_falls_back_to_django_admin() {
        let dir = TempDir::new().unwrap();
        let name = ModuleName::parse("orders").unwrap();
        let cmd = DjangoGenerator::new("/opt/bin/django-admin", true)
            .command(&SkeletonKind::Module(name), dir.path());

        assert_eq!(cmd.get_program(), "/opt/bin/django-admin");
        let args = args(&cmd);
        assert_eq!(args[..2], ["startapp", "orders"]);
        assert!(args[2].ends_with("orders"));
    }

    #[cfg(unix)]
    #[test]
    fn startapp_prefers_existing_environment() {
        let dir = TempDir::new().unwrap();
        let layout = ProjectLayout::new(dir.path());
        std::fs::create_dir_all(layout.venv_python().parent().unwrap()).unwrap();
        std::fs::write(layout.venv_python(), "").unwrap();

        let name = ModuleName::parse("orders").unwrap();
        let kind = SkeletonKind::Module(name);

        let cmd = DjangoGenerator::new("django-admin", true).command(&kind, dir.path());
        assert_eq!(PathBuf::from(cmd.get_program()), layout.venv_python());
        assert_eq!(args(&cmd)[..3], ["-m", "django", "startapp"]);

        let cmd = DjangoGenerator::new("django-admin", false).command(&kind, dir.path());
        assert_eq!(cmd.get_program(), "django-admin");
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_is_reported() {
        let dir = TempDir::new().unwrap();
        let name = ModuleName::parse("orders").unwrap();
        let err = DjangoGenerator::new("false", false)
            .generate(&SkeletonKind::Module(name), dir.path())
            .unwrap_err();
        assert!(err.to_string().starts_with("django startapp failed"));
    }

    #[cfg(unix)]
    #[test]
    fn relative_root_resolves_once() {
        use std::os::unix::fs::PermissionsExt;

        let tools = TempDir::new().unwrap();
        let script = tools.path().join("django-admin");
        std::fs::write(
            &script,
            "#!/bin/sh\n[ -d \"$3\" ] || { echo \"Destination directory '$3' does not exist\" >&2; exit 1; }\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        // A root relative to the test's working directory.
        let project = tempfile::Builder::new().tempdir_in(".").unwrap();
        let relative = PathBuf::from(project.path().file_name().unwrap());
        assert!(relative.is_relative());
        let name = ModuleName::parse("orders").unwrap();
        std::fs::create_dir_all(ProjectLayout::new(&relative).module_dir(&name)).unwrap();

        DjangoGenerator::new(script.to_string_lossy(), false)
            .generate(&SkeletonKind::Module(name), &relative)
            .unwrap();
    }
}

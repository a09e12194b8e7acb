//! Project orchestrator.
//!
//! Runs the `create-project` pipeline front to back:
//! 1. Validate the name, generate the secret
//! 2. Lay down the folder skeleton and the project files
//! 3. Bootstrap `.venv`, then write editor settings
//! 4. Run the framework generator, drop its single-file settings
//! 5. Point every entry point at `config.settings.<env>`
//! 6. Install the module driver script
//!
//! There is no rollback. A failed run leaves whatever was written, and a
//! rerun overwrites the generated files.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{
            EnvironmentProvisioner, Filesystem, SecretSource, SkeletonGenerator, SkeletonKind,
            TemplateStore,
        },
        services::{EnvironmentBootstrapper, FileSynthesizer, patch::rewrite_file},
    },
    domain::{Environment, LiteralRewrite, ProjectLayout, ProjectName, ProjectSpec, RewriteOutcome},
    error::StrataResult,
};

/// Rewrite outcome of a single entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPointReport {
    pub path: PathBuf,
    pub outcome: RewriteOutcome,
}

/// Whether the driver script was written by this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverScriptStatus {
    Installed,
    AlreadyPresent,
}

/// Summary of a `create-project` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub name: String,
    pub root: PathBuf,
    pub environment: Environment,
    pub entry_points: Vec<EntryPointReport>,
    pub driver_script: DriverScriptStatus,
    /// Every entry point carries the environment's settings reference.
    pub initialized: bool,
}

impl ProjectReport {
    /// Entry points that did not end up pointing at the layered settings.
    pub fn incomplete_entry_points(&self) -> impl Iterator<Item = &EntryPointReport> {
        self.entry_points
            .iter()
            .filter(|e| !e.outcome.is_applied())
    }
}

pub struct ProjectService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateStore>,
    generator: Box<dyn SkeletonGenerator>,
    provisioner: Box<dyn EnvironmentProvisioner>,
    secrets: Box<dyn SecretSource>,
}

impl ProjectService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateStore>,
        generator: Box<dyn SkeletonGenerator>,
        provisioner: Box<dyn EnvironmentProvisioner>,
        secrets: Box<dyn SecretSource>,
    ) -> Self {
        Self {
            filesystem,
            templates,
            generator,
            provisioner,
            secrets,
        }
    }

    /// Create the project `name` directly under `parent`.
    #[instrument(
        skip_all,
        fields(project = %name, parent = %parent.display(), env = %environment)
    )]
    pub fn create_project(
        &self,
        parent: &Path,
        name: &str,
        environment: Environment,
    ) -> StrataResult<ProjectReport> {
        let name = ProjectName::parse(name)?;
        let spec = ProjectSpec::new(parent, name, self.secrets.generate(), environment);
        let layout = spec.layout();
        let synthesizer = FileSynthesizer::new(self.filesystem.as_ref());

        info!(root = %layout.root().display(), "creating project");

        synthesizer.materialize(layout.root(), &ProjectLayout::skeleton()?)?;
        synthesizer.materialize(layout.root(), &self.templates.project_files(&spec)?)?;
        info!("project files written");

        EnvironmentBootstrapper::new(self.provisioner.as_ref(), self.filesystem.as_ref())
            .bootstrap(&layout)?;
        synthesizer.materialize(layout.root(), &self.templates.editor_files(&spec)?)?;

        self.generator.generate(&SkeletonKind::Project, layout.root())?;
        let default_settings = layout.default_settings();
        if self.filesystem.exists(&default_settings) {
            self.filesystem.remove_file(&default_settings)?;
        }
        info!("framework skeleton generated");

        let entry_points = self.rewrite_entry_points(&layout, environment)?;
        let driver_script = self.install_driver_script(&layout)?;

        let initialized = entry_points.iter().all(|e| e.outcome.is_applied());
        if !initialized {
            warn!("some entry points still reference the default settings module");
        }

        Ok(ProjectReport {
            name: spec.name().to_string(),
            root: layout.root().to_path_buf(),
            environment,
            entry_points,
            driver_script,
            initialized,
        })
    }

    fn rewrite_entry_points(
        &self,
        layout: &ProjectLayout,
        environment: Environment,
    ) -> StrataResult<Vec<EntryPointReport>> {
        let rewrite = LiteralRewrite::settings_module(environment);

        layout
            .entry_points()
            .into_iter()
            .map(|path| {
                let outcome = rewrite_file(self.filesystem.as_ref(), &path, &rewrite)?;
                Ok(EntryPointReport { path, outcome })
            })
            .collect()
    }

    fn install_driver_script(&self, layout: &ProjectLayout) -> StrataResult<DriverScriptStatus> {
        if self.filesystem.exists(&layout.driver_script()) {
            info!("driver script already present");
            return Ok(DriverScriptStatus::AlreadyPresent);
        }

        FileSynthesizer::new(self.filesystem.as_ref())
            .materialize(layout.root(), &self.templates.driver_script()?)?;
        Ok(DriverScriptStatus::Installed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{
            MockEnvironmentProvisioner, MockFilesystem, MockSecretSource, MockSkeletonGenerator,
            MockTemplateStore,
        },
    };
    use crate::domain::{DomainError, FileSet, Permissions, SecretKey};
    use crate::error::StrataError;

    const MANAGE_PY: &str =
        "    os.environ.setdefault('DJANGO_SETTINGS_MODULE', 'config.settings')\n";

    fn store() -> MockTemplateStore {
        let mut templates = MockTemplateStore::new();
        templates
            .expect_project_files()
            .returning(|_| Ok(FileSet::new().with_file("requirements.txt", "Django\n")?));
        templates
            .expect_editor_files()
            .returning(|_| Ok(FileSet::new().with_file(".vscode/settings.json", "{}")?));
        templates.expect_driver_script().returning(|| {
            let mut set = FileSet::new();
            set.add_file("scripts/create-module", "#!/bin/sh\n", Permissions::executable())?;
            Ok(set)
        });
        templates
    }

    fn secrets() -> MockSecretSource {
        let mut secrets = MockSecretSource::new();
        secrets
            .expect_generate()
            .returning(|| SecretKey::from_raw("k".repeat(50)));
        secrets
    }

    fn provisioner() -> MockEnvironmentProvisioner {
        let mut provisioner = MockEnvironmentProvisioner::new();
        provisioner.expect_create_environment().returning(|_| Ok(()));
        provisioner
            .expect_install_dependencies()
            .returning(|_, _| Ok(()));
        provisioner
    }

    /// Filesystem where everything exists except the driver script, and
    /// every entry point holds the default settings literal.
    fn filesystem() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));
        fs.expect_remove_file()
            .withf(|p| p.ends_with("config/settings.py"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_exists()
            .returning(|p| !p.ends_with("scripts/create-module"));
        fs.expect_read_to_string()
            .returning(|_| Ok(MANAGE_PY.to_string()));
        fs
    }

    #[test]
    fn full_run_reports_initialized_project() {
        let mut generator = MockSkeletonGenerator::new();
        generator
            .expect_generate()
            .withf(|kind, root| *kind == SkeletonKind::Project && root.ends_with("demo"))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ProjectService::new(
            Box::new(filesystem()),
            Box::new(store()),
            Box::new(generator),
            Box::new(provisioner()),
            Box::new(secrets()),
        );

        let report = service
            .create_project(Path::new("/w"), "demo", Environment::Staging)
            .unwrap();

        assert!(report.initialized);
        assert_eq!(report.root, PathBuf::from("/w/demo"));
        assert_eq!(report.entry_points.len(), 3);
        assert!(
            report
                .entry_points
                .iter()
                .all(|e| e.outcome == RewriteOutcome::Rewritten)
        );
        assert_eq!(report.driver_script, DriverScriptStatus::Installed);
        assert_eq!(report.incomplete_entry_points().count(), 0);
    }

    #[test]
    fn invalid_name_does_no_work() {
        let service = ProjectService::new(
            Box::new(MockFilesystem::new()),
            Box::new(MockTemplateStore::new()),
            Box::new(MockSkeletonGenerator::new()),
            Box::new(MockEnvironmentProvisioner::new()),
            Box::new(secrets()),
        );

        let err = service
            .create_project(Path::new("/w"), "../escape", Environment::Dev)
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Domain(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn generator_failure_aborts_before_rewrites() {
        let mut generator = MockSkeletonGenerator::new();
        generator.expect_generate().returning(|_, _| {
            Err(ApplicationError::ExternalToolFailure {
                tool: "django startproject".into(),
                status: Some(1),
                diagnostics: "CommandError".into(),
            }
            .into())
        });

        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string().never();
        fs.expect_remove_file().never();

        let service = ProjectService::new(
            Box::new(fs),
            Box::new(store()),
            Box::new(generator),
            Box::new(provisioner()),
            Box::new(secrets()),
        );

        let err = service
            .create_project(Path::new("/w"), "demo", Environment::Dev)
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::Application(ApplicationError::ExternalToolFailure { .. })
        ));
    }

    #[test]
    fn unexpected_entry_point_content_is_reported_not_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs.expect_set_permissions().returning(|_, _| Ok(()));
        fs.expect_remove_file().returning(|_| Ok(()));
        fs.expect_exists().returning(|p| !p.ends_with("config/asgi.py"));
        fs.expect_read_to_string()
            .returning(|_| Ok("import os\n".to_string()));

        let mut generator = MockSkeletonGenerator::new();
        generator.expect_generate().returning(|_, _| Ok(()));

        let service = ProjectService::new(
            Box::new(fs),
            Box::new(store()),
            Box::new(generator),
            Box::new(provisioner()),
            Box::new(secrets()),
        );

        let report = service
            .create_project(Path::new("/w"), "demo", Environment::Dev)
            .unwrap();

        assert!(!report.initialized);
        let outcomes: Vec<_> = report.entry_points.iter().map(|e| e.outcome).collect();
        assert_eq!(
            outcomes,
            [
                RewriteOutcome::LiteralNotFound,
                RewriteOutcome::LiteralNotFound,
                RewriteOutcome::MissingTargetFile,
            ]
        );
        assert_eq!(report.driver_script, DriverScriptStatus::AlreadyPresent);
    }
}

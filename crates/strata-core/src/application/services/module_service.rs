//! Module generator: adds one module skeleton to an existing project and
//! registers it in the base settings.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SkeletonGenerator, SkeletonKind, TemplateStore},
        services::{FileSynthesizer, patch::rewrite_file},
    },
    domain::{
        LiteralRewrite, ModuleLayout, ModuleName, ProjectLayout, RegistrationOutcome,
        RewriteOutcome, register,
    },
    error::StrataResult,
};

/// What happened to the base settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryUpdate {
    Inserted,
    AlreadyRegistered,
    ListNotFound,
    SettingsMissing,
}

impl From<RegistrationOutcome> for RegistryUpdate {
    fn from(outcome: RegistrationOutcome) -> Self {
        match outcome {
            RegistrationOutcome::Inserted => Self::Inserted,
            RegistrationOutcome::AlreadyRegistered => Self::AlreadyRegistered,
            RegistrationOutcome::ListNotFound => Self::ListNotFound,
        }
    }
}

impl RegistryUpdate {
    /// The module is listed in the settings after this run.
    pub fn is_registered(self) -> bool {
        matches!(self, Self::Inserted | Self::AlreadyRegistered)
    }
}

/// Summary of a `create-module` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub module: ModuleName,
    /// Dotted path the module was registered under.
    pub qualified: String,
    pub path: PathBuf,
    pub app_config: RewriteOutcome,
    pub registry: RegistryUpdate,
}

pub struct ModuleService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateStore>,
    generator: Box<dyn SkeletonGenerator>,
}

impl ModuleService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateStore>,
        generator: Box<dyn SkeletonGenerator>,
    ) -> Self {
        Self {
            filesystem,
            templates,
            generator,
        }
    }

    /// Create module `name` inside the project at `project_root`.
    ///
    /// Steps up to and including the file writes abort on failure. The
    /// app-config rewrite and the registration only report their outcome.
    #[instrument(skip_all, fields(module = %name, project = %project_root.display()))]
    pub fn create_module(&self, project_root: &Path, name: &str) -> StrataResult<ModuleReport> {
        let name = ModuleName::parse(name)?;

        if !self.filesystem.exists(project_root) {
            return Err(ApplicationError::ProjectNotFound {
                path: project_root.to_path_buf(),
            }
            .into());
        }

        let project = ProjectLayout::new(project_root);
        let module = ModuleLayout::new(&project, &name);

        self.filesystem.create_dir_all(&project.modules_dir())?;
        self.filesystem.create_dir_all(module.dir())?;

        self.generator
            .generate(&SkeletonKind::Module(name.clone()), project_root)?;
        info!("module skeleton generated");

        let default_tests = module.default_tests();
        if self.filesystem.exists(&default_tests) {
            self.filesystem.remove_file(&default_tests)?;
        }

        let synthesizer = FileSynthesizer::new(self.filesystem.as_ref());
        synthesizer.materialize(module.dir(), &ModuleLayout::test_folders()?)?;
        synthesizer.materialize(module.dir(), &self.templates.module_files(&name)?)?;

        let app_config = rewrite_file(
            self.filesystem.as_ref(),
            &module.app_config(),
            &LiteralRewrite::app_config_name(&name),
        )?;

        let registry = self.register(&project, &name)?;

        Ok(ModuleReport {
            qualified: name.qualified(),
            path: module.dir().to_path_buf(),
            module: name,
            app_config,
            registry,
        })
    }

    fn register(&self, project: &ProjectLayout, name: &ModuleName) -> StrataResult<RegistryUpdate> {
        let settings = project.base_settings();
        if !self.filesystem.exists(&settings) {
            warn!(path = %settings.display(), "settings file not found, skipping registration");
            return Ok(RegistryUpdate::SettingsMissing);
        }

        let document = self.filesystem.read_to_string(&settings)?;
        let registration = register(&document, &name.qualified());

        if registration.changed() {
            self.filesystem.write_file(&settings, &registration.document)?;
        }

        match registration.outcome {
            RegistrationOutcome::Inserted => {
                info!(entry = %name.qualified(), "registered module");
            }
            RegistrationOutcome::AlreadyRegistered => {
                info!(entry = %name.qualified(), "module already registered");
            }
            RegistrationOutcome::ListNotFound => {
                warn!(path = %settings.display(), "no INSTALLED_APPS list found");
            }
        }

        Ok(registration.outcome.into())
    }
}

//! Canonical paths of a generated project and its modules.
//!
//! Other tooling depends on this layout, so every path the services touch is
//! spelled out here once.

use std::path::{Path, PathBuf};

use crate::domain::{
    entities::file_set::FileSet,
    error::DomainError,
    value_objects::{Environment, MODULES_NAMESPACE, ModuleName},
};

/// Python package the framework generator emits the entry points into.
pub const CONFIG_PACKAGE: &str = "config";

/// Dotted prefix of the layered settings package.
pub const SETTINGS_NAMESPACE: &str = "config.settings";

/// Folders every project starts with, relative to the project root.
pub const PROJECT_FOLDERS: &[&str] = &[
    MODULES_NAMESPACE,
    "config",
    "config/settings",
    "config/middleware",
    "config/decorators",
    "config/logging",
    "config/exceptions",
    "config/utils",
    "static",
    "templates",
    "media",
    "logs",
    "scripts",
];

/// Generated files that bootstrap the application from a settings module.
pub const ENTRY_POINTS: &[&str] = &["manage.py", "config/wsgi.py", "config/asgi.py"];

/// Test folders created inside every module.
pub const MODULE_TEST_FOLDERS: &[&str] = &["tests/unit", "tests/integration"];

/// All canonical paths within a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.root.join(MODULES_NAMESPACE)
    }

    pub fn module_dir(&self, name: &ModuleName) -> PathBuf {
        self.modules_dir().join(name.as_str())
    }

    pub fn base_settings(&self) -> PathBuf {
        self.root.join("config").join("settings").join("base.py")
    }

    /// Single-file settings module the framework generator emits.
    pub fn default_settings(&self) -> PathBuf {
        self.root.join(CONFIG_PACKAGE).join("settings.py")
    }

    pub fn manifest(&self) -> PathBuf {
        self.root.join("requirements.txt")
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(".venv")
    }

    /// Interpreter inside the project environment.
    pub fn venv_python(&self) -> PathBuf {
        venv_executable(&self.venv_dir(), "python")
    }

    /// Package installer inside the project environment.
    pub fn venv_pip(&self) -> PathBuf {
        venv_executable(&self.venv_dir(), "pip")
    }

    pub fn driver_script(&self) -> PathBuf {
        self.root.join("scripts").join("create-module")
    }

    pub fn entry_points(&self) -> Vec<PathBuf> {
        ENTRY_POINTS.iter().map(|p| self.root.join(p)).collect()
    }

    /// Directory skeleton created before any file is written.
    pub fn skeleton() -> Result<FileSet, DomainError> {
        let mut set = FileSet::new();
        for folder in PROJECT_FOLDERS {
            set.add_directory(folder)?;
        }
        Ok(set)
    }
}

/// Path of `tool` inside a virtual environment (`bin/` or `Scripts/*.exe`).
pub fn venv_executable(venv: &Path, tool: &str) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join(format!("{tool}.exe"))
    } else {
        venv.join("bin").join(tool)
    }
}

/// Settings module an environment selects, e.g. `config.settings.prod`.
pub fn settings_module(environment: Environment) -> String {
    format!("{SETTINGS_NAMESPACE}.{environment}")
}

/// Paths inside one module directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    dir: PathBuf,
}

impl ModuleLayout {
    pub fn new(project: &ProjectLayout, name: &ModuleName) -> Self {
        Self {
            dir: project.module_dir(name),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Single-file test stub the framework generator emits.
    pub fn default_tests(&self) -> PathBuf {
        self.dir.join("tests.py")
    }

    pub fn app_config(&self) -> PathBuf {
        self.dir.join("apps.py")
    }

    pub fn test_folders() -> Result<FileSet, DomainError> {
        let mut set = FileSet::new();
        for folder in MODULE_TEST_FOLDERS {
            set.add_directory(folder)?;
        }
        Ok(set)
    }
}

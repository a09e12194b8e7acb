//! Templates compiled into the binary.
//!
//! Every file a run writes comes from here, rendered through
//! [`RenderContext`]. Sources live under `templates/` in this crate:
//!
//! | Directory   | Written into             | Variables                         |
//! |-------------|--------------------------|-----------------------------------|
//! | `project/`  | project root             | secret, environment, project name |
//! | `module/`   | `modules/<name>/`        | module name and dotted path       |
//! | `scripts/`  | project root             | none                              |

use serde_json::json;
use tracing::{debug, instrument};

use strata_core::{
    application::ports::TemplateStore,
    domain::{
        FileSet, ModuleName, Permissions, ProjectSpec, RenderContext, venv_executable,
    },
    error::{Context, StrataResult},
};

const PROJECT_FILES: &[(&str, &str)] = &[
    (
        "requirements.txt",
        include_str!("../templates/project/requirements.txt"),
    ),
    (".gitignore", include_str!("../templates/project/gitignore")),
    ("config/.env", include_str!("../templates/project/env")),
    (
        "config/settings/__init__.py",
        include_str!("../templates/project/settings/__init__.py"),
    ),
    (
        "config/settings/base.py",
        include_str!("../templates/project/settings/base.py"),
    ),
    (
        "config/settings/dev.py",
        include_str!("../templates/project/settings/dev.py"),
    ),
    (
        "config/settings/staging.py",
        include_str!("../templates/project/settings/staging.py"),
    ),
    (
        "config/settings/prod.py",
        include_str!("../templates/project/settings/prod.py"),
    ),
];

const MODULE_FILES: &[(&str, &str)] = &[
    ("views.py", include_str!("../templates/module/views.py")),
    (
        "serializers.py",
        include_str!("../templates/module/serializers.py"),
    ),
    ("models.py", include_str!("../templates/module/models.py")),
    ("urls.py", include_str!("../templates/module/urls.py")),
    ("services.py", include_str!("../templates/module/services.py")),
    ("utils.py", include_str!("../templates/module/utils.py")),
    ("tests/__init__.py", ""),
    ("tests/unit/__init__.py", ""),
    ("tests/integration/__init__.py", ""),
];

const DRIVER_SCRIPT_PATH: &str = "scripts/create-module";
const DRIVER_SCRIPT: &str = include_str!("../templates/scripts/create-module");

/// [`TemplateStore`] over the embedded templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }
}

fn render_all(files: &[(&str, &str)], ctx: &RenderContext) -> StrataResult<FileSet> {
    let mut set = FileSet::new();
    for (path, source) in files {
        set.add_file(*path, ctx.render(source), Permissions::read_write())?;
    }
    Ok(set)
}

impl TemplateStore for BuiltinTemplates {
    #[instrument(skip_all, fields(project = %spec.name()))]
    fn project_files(&self, spec: &ProjectSpec) -> StrataResult<FileSet> {
        let set = render_all(PROJECT_FILES, &RenderContext::for_project(spec))?;
        debug!(files = set.len(), "rendered project files");
        Ok(set)
    }

    fn editor_files(&self, spec: &ProjectSpec) -> StrataResult<FileSet> {
        let layout = spec.layout();
        let relative_venv = layout
            .venv_dir()
            .strip_prefix(layout.root())
            .map(ToOwned::to_owned)
            .context("environment directory outside project root")?;
        let interpreter = venv_executable(&relative_venv, "python");

        let settings = json!({
            "python.defaultInterpreterPath": format!(
                "${{workspaceFolder}}/{}",
                interpreter.display().to_string().replace('\\', "/")
            ),
            "python.terminal.activateEnvironment": true,
        });
        let content = serde_json::to_string_pretty(&settings)
            .context("serialize editor settings")?;

        Ok(FileSet::new().with_file(".vscode/settings.json", content + "\n")?)
    }

    fn module_files(&self, name: &ModuleName) -> StrataResult<FileSet> {
        render_all(MODULE_FILES, &RenderContext::for_module(name))
    }

    fn driver_script(&self) -> StrataResult<FileSet> {
        let mut set = FileSet::new();
        set.add_file(DRIVER_SCRIPT_PATH, DRIVER_SCRIPT, Permissions::executable())?;
        Ok(set)
    }
}

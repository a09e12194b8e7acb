//! `strata create-module`.

use tracing::{info, instrument};

use strata_adapters::{BuiltinTemplates, LocalFilesystem};
use strata_core::{
    application::{ModuleReport, ModuleService, RegistryUpdate},
    domain::RewriteOutcome,
};

use crate::{
    cli::CreateModuleArgs,
    commands::django,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(module = %args.name, project = %args.project_dir.display()))]
pub fn execute(args: CreateModuleArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project_dir = std::path::absolute(&args.project_dir).map_err(|e| CliError::IoError {
        message: format!("cannot resolve {}", args.project_dir.display()),
        source: e,
    })?;

    let service = ModuleService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(BuiltinTemplates::new()),
        Box::new(django(&config)),
    );

    let spinner = output.spinner("Running startapp...");
    let result = service.create_module(&project_dir, &args.name);
    spinner.finish_and_clear();
    let report = result?;

    info!(registry = ?report.registry, app_config = ?report.app_config, "module created");

    if output.is_json() {
        return output.report(&report);
    }
    render(&report, &output)?;
    Ok(())
}

fn render(report: &ModuleReport, output: &OutputManager) -> std::io::Result<()> {
    let apps = report.path.join("apps.py");
    match report.app_config {
        RewriteOutcome::Rewritten | RewriteOutcome::AlreadyApplied => {}
        RewriteOutcome::MissingTargetFile => {
            output.warning(&format!("{} not found, app name left as is", apps.display()))?;
        }
        RewriteOutcome::LiteralNotFound => output.warning(&format!(
            "{} has no `name = '{}'` line, set it to '{}' by hand",
            apps.display(),
            report.module,
            report.qualified
        ))?,
    }

    match report.registry {
        RegistryUpdate::Inserted => {
            output.success(&format!("Registered '{}' in INSTALLED_APPS", report.qualified))?;
        }
        RegistryUpdate::AlreadyRegistered => {
            output.info(&format!("'{}' was already registered", report.qualified))?;
        }
        RegistryUpdate::ListNotFound => output.warning(&format!(
            "No INSTALLED_APPS list in config/settings/base.py, add '{}' by hand",
            report.qualified
        ))?,
        RegistryUpdate::SettingsMissing => output.warning(&format!(
            "config/settings/base.py not found, add '{}' to INSTALLED_APPS by hand",
            report.qualified
        ))?,
    }

    output.success(&format!(
        "Module '{}' created at {}",
        report.module,
        report.path.display()
    ))?;
    Ok(())
}

//! `strata create-project`.

use std::env;

use tracing::{info, instrument};

use strata_adapters::{BuiltinTemplates, LocalFilesystem, OsSecretSource};
use strata_core::{
    application::{DriverScriptStatus, ProjectReport, ProjectService},
    domain::RewriteOutcome,
};

use crate::{
    cli::CreateProjectArgs,
    commands::{django, venv},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: CreateProjectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let environment = config.environment(args.env.map(Into::into));
    let parent = env::current_dir().map_err(|e| CliError::IoError {
        message: "cannot resolve the current directory".into(),
        source: e,
    })?;

    let service = ProjectService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(BuiltinTemplates::new()),
        Box::new(django(&config)),
        Box::new(venv(&config)),
        Box::new(OsSecretSource),
    );

    output.header(&format!("Creating project '{}' ({environment})", args.name))?;
    let spinner = output.spinner("Running startproject and installing dependencies...");
    let result = service.create_project(&parent, &args.name, environment);
    spinner.finish_and_clear();
    let report = result?;

    info!(root = %report.root.display(), initialized = report.initialized, "project created");

    if output.is_json() {
        return output.report(&report);
    }
    render(&report, &output)?;
    Ok(())
}

fn render(report: &ProjectReport, output: &OutputManager) -> std::io::Result<()> {
    for entry in report.incomplete_entry_points() {
        let why = match entry.outcome {
            RewriteOutcome::MissingTargetFile => "file not found",
            RewriteOutcome::LiteralNotFound => "settings literal not found",
            RewriteOutcome::Rewritten | RewriteOutcome::AlreadyApplied => continue,
        };
        output.warning(&format!(
            "{} still points at the default settings ({why})",
            entry.path.display()
        ))?;
    }

    if report.driver_script == DriverScriptStatus::AlreadyPresent {
        output.info("scripts/create-module already exists, left untouched")?;
    }

    output.success(&format!(
        "Project '{}' created at {}",
        report.name,
        report.root.display()
    ))?;

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", report.name))?;
    output.print("  ./scripts/create-module <name>")?;
    output.print("  .venv/bin/python manage.py migrate")?;
    Ok(())
}

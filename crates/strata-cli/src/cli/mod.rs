//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here. Nothing in this
//! module touches the filesystem or spawns tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use strata_core::domain::Environment;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered Django projects and modules",
    long_about = "Strata creates Django projects with per-environment settings and \
                  an isolated Python environment, then adds modules to them and \
                  registers each one in INSTALLED_APPS exactly once.",
    after_help = "EXAMPLES:\n\
        \x20 strata create-project shop --env dev\n\
        \x20 cd shop && strata create-module orders\n\
        \x20 strata create-module billing --project-dir ./shop\n\
        \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Django project in the current directory.
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 strata create-project shop\n\
            \x20 strata create-project shop --env prod"
    )]
    CreateProject(CreateProjectArgs),

    /// Add a module to an existing project and register it.
    #[command(
        about = "Create a module inside a project",
        after_help = "EXAMPLES:\n\
            \x20 strata create-module orders\n\
            \x20 strata create-module orders --project-dir ../shop"
    )]
    CreateModule(CreateModuleArgs),

    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create-project ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateProjectArgs {
    /// Directory name of the project, created under the current directory.
    #[arg(value_name = "PROJECT_NAME", help = "Project name")]
    pub name: String,

    /// Environment the entry points are pinned to. Falls back to
    /// `defaults.environment` from the configuration, then `dev`.
    #[arg(
        short = 'e',
        long = "env",
        value_name = "ENV",
        value_enum,
        help = "Target environment"
    )]
    pub env: Option<EnvironmentArg>,
}

// ── create-module ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateModuleArgs {
    /// Python identifier; becomes `modules.<name>`.
    #[arg(value_name = "MODULE_NAME", help = "Module name")]
    pub name: String,

    #[arg(
        short = 'p',
        long = "project-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Root of the project to add the module to"
    )]
    pub project_dir: PathBuf,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum EnvironmentArg {
    #[value(alias = "development")]
    Dev,
    Staging,
    #[value(alias = "production")]
    Prod,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Dev => Self::Dev,
            EnvironmentArg::Staging => Self::Staging,
            EnvironmentArg::Prod => Self::Prod,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create_project_with_env() {
        let cli = Cli::parse_from(["strata", "create-project", "shop", "--env", "prod"]);
        match cli.command {
            Commands::CreateProject(args) => {
                assert_eq!(args.name, "shop");
                assert_eq!(args.env, Some(EnvironmentArg::Prod));
            }
            other => panic!("expected create-project, got {other:?}"),
        }
    }

    #[test]
    fn env_is_optional() {
        let cli = Cli::parse_from(["strata", "create-project", "shop"]);
        assert!(matches!(
            cli.command,
            Commands::CreateProject(CreateProjectArgs { env: None, .. })
        ));
    }

    #[test]
    fn long_environment_names_are_aliases() {
        let cli = Cli::parse_from(["strata", "create-project", "x", "--env", "production"]);
        let Commands::CreateProject(args) = cli.command else {
            panic!("expected create-project");
        };
        assert_eq!(args.env.map(Environment::from), Some(Environment::Prod));
    }

    #[test]
    fn project_dir_defaults_to_current_directory() {
        let cli = Cli::parse_from(["strata", "create-module", "orders"]);
        let Commands::CreateModule(args) = cli.command else {
            panic!("expected create-module");
        };
        assert_eq!(args.project_dir, PathBuf::from("."));
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let result = Cli::try_parse_from(["strata", "create-project", "x", "--env", "qa"]);
        assert!(result.is_err());
    }

    #[test]
    fn extra_positional_is_rejected() {
        let result = Cli::try_parse_from(["strata", "create-module", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["strata", "-q", "-v", "create-module", "orders"]);
        assert!(result.is_err());
    }
}

//! Flags accepted before or after any subcommand.

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level for the scaffolding steps. `RUST_LOG` takes precedence.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show what strata does (-v steps, -vv tool invocations)",
        long_help = "Log what strata does on stderr:
    (none)  - Warnings, e.g. a settings file that could not be updated
    -v      - Each scaffolding step as it completes
    -vv     - Every django-admin, python and pip invocation, every file written
    -vvv    - Trace level"
    )]
    pub verbose: u8,

    /// Hides the spinner, status lines and the next-steps summary. A JSON
    /// report is still written.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors"
    )]
    pub quiet: bool,

    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Print without ANSI colours (also `output.no_color` in config)"
    )]
    pub no_color: bool,

    /// Read after the user config file and before `STRATA_*` variables.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Extra TOML config with [defaults], [tools] and [output] tables"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How the project or module report is printed"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of the report printed once a command finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured status lines and a spinner while tools run.
    Human,
    Plain,
    /// The project or module report as a single JSON document.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "strata",
            "create-module",
            "orders",
            "-vv",
            "--output-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.output_format, OutputFormat::Json);
    }

    #[test]
    fn quiet_and_verbose_are_exclusive() {
        let err = Cli::try_parse_from(["strata", "-q", "-v", "create-module", "orders"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}

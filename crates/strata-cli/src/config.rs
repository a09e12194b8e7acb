//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! core crate never sees it; commands turn it into adapter settings.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the commands)
//! 2. `STRATA_*` environment variables, `__` between nested keys
//!    (`STRATA_TOOLS__PYTHON=python3.12`)
//! 3. The file given with `--config`
//! 4. `config.toml` in the user config directory
//! 5. Built-in defaults

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use strata_core::domain::Environment;

const ENV_PREFIX: &str = "STRATA";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: Defaults,
    pub tools: ToolsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Used by `create-project` when `--env` is not given.
    pub environment: Environment,
}

/// External programs the adapters invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Interpreter that creates the project environment.
    pub python: String,
    /// Fallback for `startapp` when the project environment is not used.
    pub django_admin: String,
    /// Run `startapp` through the project's own interpreter when it exists.
    pub prefer_project_env: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            python: if cfg!(windows) { "python" } else { "python3" }.into(),
            django_admin: "django-admin".into(),
            prefer_project_env: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Merge every layer into one configuration.
    ///
    /// A file passed with `--config` must exist; the per-user file is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(config_file, None)
    }

    fn load_with(
        config_file: Option<&PathBuf>,
        env_vars: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Failed to encode defaults")?);

        if let Some(user) = Self::config_path() {
            debug!(path = %user.display(), "user config");
            builder = builder.add_source(File::from(user.as_path()).required(false));
        }

        if let Some(path) = config_file {
            debug!(path = %path.display(), "explicit config");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env_vars),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize::<Self>()
            .context("Failed to deserialize configuration")?;

        Ok(config)
    }

    /// `config.toml` under the platform config directory
    /// (`~/.config/strata/` on Linux).
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Resolve the environment for `create-project`.
    pub fn environment(&self, flag: Option<Environment>) -> Environment {
        flag.unwrap_or(self.defaults.environment)
    }
}

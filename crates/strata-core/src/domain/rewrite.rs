//! Literal rewrites applied to framework-generated files.

use serde::Serialize;

use crate::domain::{
    entities::layout::{SETTINGS_NAMESPACE, settings_module},
    value_objects::{Environment, ModuleName},
};

/// Outcome recorded per rewritten file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteOutcome {
    Rewritten,
    /// The file already carries the replacement.
    AlreadyApplied,
    LiteralNotFound,
    MissingTargetFile,
}

impl RewriteOutcome {
    /// True when the file ends up carrying the replacement.
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Rewritten | Self::AlreadyApplied)
    }
}

/// Result of applying a rewrite to in-memory content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteResult {
    Rewritten(String),
    AlreadyApplied,
    LiteralNotFound,
}

impl RewriteResult {
    pub fn outcome(&self) -> RewriteOutcome {
        match self {
            Self::Rewritten(_) => RewriteOutcome::Rewritten,
            Self::AlreadyApplied => RewriteOutcome::AlreadyApplied,
            Self::LiteralNotFound => RewriteOutcome::LiteralNotFound,
        }
    }
}

/// Exact-text substitution of the first occurrence of one of several
/// equivalent literals. No parsing, no pattern matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRewrite {
    variants: Vec<(String, String)>,
}

impl LiteralRewrite {
    /// Points the default settings lookup at `config.settings.<env>`.
    pub fn settings_module(environment: Environment) -> Self {
        let target = settings_module(environment);
        let variants = ['\'', '"']
            .into_iter()
            .map(|q| {
                (
                    format!(
                        "os.environ.setdefault({q}DJANGO_SETTINGS_MODULE{q}, {q}{SETTINGS_NAMESPACE}{q})"
                    ),
                    format!("os.environ.setdefault({q}DJANGO_SETTINGS_MODULE{q}, {q}{target}{q})"),
                )
            })
            .collect();
        Self { variants }
    }

    /// Qualifies the app label in a generated `apps.py` with the modules
    /// namespace.
    pub fn app_config_name(module: &ModuleName) -> Self {
        let bare = module.as_str();
        let qualified = module.qualified();
        let variants = ['\'', '"']
            .into_iter()
            .map(|q| {
                (
                    format!("    name = {q}{bare}{q}"),
                    format!("    name = {q}{qualified}{q}"),
                )
            })
            .collect();
        Self { variants }
    }

    pub fn apply(&self, content: &str) -> RewriteResult {
        for (from, to) in &self.variants {
            if content.contains(from.as_str()) {
                return RewriteResult::Rewritten(content.replacen(from.as_str(), to, 1));
            }
        }

        if self
            .variants
            .iter()
            .any(|(_, to)| content.contains(to.as_str()))
        {
            RewriteResult::AlreadyApplied
        } else {
            RewriteResult::LiteralNotFound
        }
    }
}

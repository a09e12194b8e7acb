//! Domain value objects: Environment, ProjectName, ModuleName, SecretKey.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Names
//! are validated once at construction; everything downstream can rely on the
//! invariants without re-checking.

use std::fmt;
use std::str::FromStr;

use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── Environment ──────────────────────────────────────────────────────────────

/// Deployment environment a generated project is pinned to.
///
/// Deserializes through [`FromStr`], so configuration files accept the same
/// aliases as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Self::Dev, Self::Staging, Self::Prod];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    /// Whether settings for this environment run with debugging enabled.
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "staging" => Ok(Self::Staging),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(DomainError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// A directory-name-safe project name.
///
/// Invariant: non-empty, not a dot-directory, only ASCII letters, digits,
/// `-` and `_`. The name is substituted into generated Python sources, so
/// nothing outside that set may reach them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("name cannot contain path separators"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return Err(invalid(
                "name may only contain ASCII letters, digits, '-' and '_'",
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ModuleName ───────────────────────────────────────────────────────────────

/// Namespace every generated module lives under.
pub const MODULES_NAMESPACE: &str = "modules";

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Name of an application module, e.g. `orders`.
///
/// Invariant: an ASCII Python identifier that is not a keyword. That is the
/// syntax the framework's `startapp` command accepts, and it rules out path
/// separators by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidModuleName {
            name: name.clone(),
            reason: reason.into(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name cannot be empty")),
            Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
                return Err(invalid("name must start with a letter or underscore"));
            }
            Some(_) => {}
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("name cannot contain path separators"));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid(
                "name may only contain letters, digits, and underscores",
            ));
        }
        if PYTHON_KEYWORDS.contains(&name.as_str()) {
            return Err(invalid("name is a reserved Python keyword"));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dotted import path used in the registry, e.g. `modules.orders`.
    pub fn qualified(&self) -> String {
        format!("{MODULES_NAMESPACE}.{}", self.0)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── SecretKey ────────────────────────────────────────────────────────────────

/// Length of generated secrets.
pub const SECRET_LENGTH: usize = 50;

/// Letters, digits and punctuation, minus `'` and `\` so the value survives
/// single-quoting in the generated `.env` file.
const SECRET_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789\
!\"#$%&()*+,-./:;<=>?@[]^_`{|}~";

/// Placeholder credential written into generated configuration.
///
/// `Debug` is redacted so the value never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    /// Draw a fresh secret from a cryptographically secure RNG.
    pub fn generate<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        let value = (0..SECRET_LENGTH)
            .map(|_| char::from(SECRET_ALPHABET[rng.gen_range(0..SECRET_ALPHABET.len())]))
            .collect();
        Self(value)
    }

    /// Wrap an existing value (tests, fixed fixtures).
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn environment_parses_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Prod);
        assert_eq!(" staging ".parse::<Environment>().unwrap(), Environment::Staging);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn environment_deserializes_aliases() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Prod);
        assert_eq!(serde_json::to_string(&env).unwrap(), "\"prod\"");

        let err = serde_json::from_str::<Environment>("\"qa\"").unwrap_err();
        assert!(err.to_string().contains("Unknown environment 'qa'"));
    }

    #[test]
    fn only_dev_is_debug() {
        assert!(Environment::Dev.is_debug());
        assert!(!Environment::Staging.is_debug());
        assert!(!Environment::Prod.is_debug());
    }

    #[test]
    fn project_name_rejects_separators_and_dotfiles() {
        assert!(ProjectName::parse("demo").is_ok());
        assert!(ProjectName::parse("shop-api").is_ok());
        assert!(ProjectName::parse("").is_err());
        assert!(ProjectName::parse("..").is_err());
        assert!(ProjectName::parse(".hidden").is_err());
        assert!(ProjectName::parse("a/b").is_err());
        assert!(ProjectName::parse("a\\b").is_err());
    }

    #[test]
    fn project_name_rejects_characters_unsafe_in_sources() {
        assert!(ProjectName::parse("shop_backend2").is_ok());
        for name in ["shop\"\"\"", "shop'", "my shop", "shop\n", "caf\u{e9}", "a\0b"] {
            let err = ProjectName::parse(name).unwrap_err();
            assert!(err.to_string().contains("ASCII letters"), "{name:?}: {err}");
        }
    }

    #[test]
    fn module_name_must_be_identifier() {
        assert!(ModuleName::parse("orders").is_ok());
        assert!(ModuleName::parse("_internal").is_ok());
        assert!(ModuleName::parse("user_profiles2").is_ok());
        assert!(ModuleName::parse("").is_err());
        assert!(ModuleName::parse("2fa").is_err());
        assert!(ModuleName::parse("order-items").is_err());
        assert!(ModuleName::parse("a/b").is_err());
        assert!(ModuleName::parse("class").is_err());
    }

    #[test]
    fn module_name_qualifies_under_namespace() {
        let name = ModuleName::parse("orders").unwrap();
        assert_eq!(name.qualified(), "modules.orders");
    }

    #[test]
    fn secret_has_fixed_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let secret = SecretKey::generate(&mut rng);
        assert_eq!(secret.expose().chars().count(), SECRET_LENGTH);
        assert!(secret.expose().bytes().all(|b| SECRET_ALPHABET.contains(&b)));
        assert!(!secret.expose().contains(['\'', '\\']));
    }

    #[test]
    fn secrets_differ_between_draws() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_ne!(SecretKey::generate(&mut rng), SecretKey::generate(&mut rng));
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SecretKey::from_raw("hunter2");
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}

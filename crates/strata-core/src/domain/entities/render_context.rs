use std::collections::HashMap;

use crate::domain::{
    entities::{layout::settings_module, project_spec::ProjectSpec},
    value_objects::ModuleName,
};

/// Variables available to file templates as `{{NAME}}` placeholders.
///
/// | Variable          | Example                          | Source        |
/// |-------------------|----------------------------------|---------------|
/// | `PROJECT_NAME`    | "shop"                           | project       |
/// | `SECRET_KEY`      | 50 random characters             | project       |
/// | `ENVIRONMENT`     | "dev"                            | project       |
/// | `DEBUG`           | "True"                           | environment   |
/// | `SETTINGS_MODULE` | "config.settings.dev"            | environment   |
/// | `MODULE_NAME`     | "orders"                         | module        |
/// | `MODULE_PATH`     | "modules.orders"                 | module        |
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_project(spec: &ProjectSpec) -> Self {
        let env = spec.environment();
        Self::new()
            .with_variable("PROJECT_NAME", spec.name().as_str())
            .with_variable("SECRET_KEY", spec.secret().expose())
            .with_variable("ENVIRONMENT", env.as_str())
            .with_variable("DEBUG", if env.is_debug() { "True" } else { "False" })
            .with_variable("SETTINGS_MODULE", settings_module(env))
    }

    pub fn for_module(name: &ModuleName) -> Self {
        Self::new()
            .with_variable("MODULE_NAME", name.as_str())
            .with_variable("MODULE_PATH", name.qualified())
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace `{{NAME}}` placeholders in one left-to-right pass.
    ///
    /// Substituted values are never rescanned, so a secret containing braces
    /// comes out verbatim. Unknown placeholders are kept as written.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match after.find("}}") {
                Some(end) => match self.get(after[..end].trim()) {
                    Some(value) => {
                        out.push_str(value);
                        rest = &after[end + 2..];
                    }
                    None => {
                        out.push_str("{{");
                        rest = after;
                    }
                },
                None => {
                    out.push_str(&rest[start..]);
                    return out;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

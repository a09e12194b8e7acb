use std::path::{Path, PathBuf};

use crate::domain::{
    entities::layout::ProjectLayout,
    value_objects::{Environment, ProjectName, SecretKey},
};

/// Everything one `create-project` run is parameterized by.
///
/// Built once, never mutated; its only lasting effect is the files it
/// produces.
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    name: ProjectName,
    root: PathBuf,
    secret: SecretKey,
    environment: Environment,
}

impl ProjectSpec {
    /// Place the project named `name` directly under `parent`.
    pub fn new(
        parent: impl AsRef<Path>,
        name: ProjectName,
        secret: SecretKey,
        environment: Environment,
    ) -> Self {
        let root = parent.as_ref().join(name.as_str());
        Self {
            name,
            root,
            secret,
            environment,
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_parent_joined_with_name() {
        let spec = ProjectSpec::new(
            "/srv",
            ProjectName::parse("demo").unwrap(),
            SecretKey::from_raw("s3cret"),
            Environment::Prod,
        );
        assert_eq!(spec.root(), Path::new("/srv/demo"));
        assert_eq!(spec.layout().manifest(), PathBuf::from("/srv/demo/requirements.txt"));
        assert_eq!(spec.environment(), Environment::Prod);
    }
}

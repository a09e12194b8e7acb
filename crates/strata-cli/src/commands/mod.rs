//! Command handlers. Each turns parsed arguments into a service call on
//! real adapters and renders the report.

use strata_adapters::{DjangoGenerator, VenvProvisioner};

use crate::config::AppConfig;

pub mod completions;
pub mod create_module;
pub mod create_project;

fn django(config: &AppConfig) -> DjangoGenerator {
    DjangoGenerator::new(
        config.tools.django_admin.clone(),
        config.tools.prefer_project_env,
    )
}

fn venv(config: &AppConfig) -> VenvProvisioner {
    VenvProvisioner::new(config.tools.python.clone())
}

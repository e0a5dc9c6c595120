//! CLI Commands

pub mod check;
pub mod init;
pub mod run;

pub use check::CheckCommand;
pub use init::InitCommand;
pub use run::RunCommand;

use crate::demo::SAMPLE_CATALOG;
use clap::Args;
use shared::{CatalogConfig, GenericPrincipal, Identity};
use std::path::PathBuf;

/// Catalog and principal options shared by `run` and `check`
#[derive(Debug, Clone, Default, Args)]
pub struct HostArgs {
    /// Catalog file (YAML or JSON); the sample catalog when omitted
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Principal name
    #[arg(short, long)]
    pub user: Option<String>,

    /// Role held by the principal (repeatable)
    #[arg(short, long = "role")]
    pub roles: Vec<String>,
}

impl HostArgs {
    pub fn load_catalog(&self) -> anyhow::Result<CatalogConfig> {
        let config = match &self.catalog {
            Some(path) => CatalogConfig::from_file(path)?,
            None => CatalogConfig::from_yaml_str(SAMPLE_CATALOG)?,
        };
        Ok(config)
    }

    /// Principal from the command line, else the catalog's, else anonymous
    pub fn principal(&self, config: &CatalogConfig) -> GenericPrincipal {
        if self.user.is_some() || !self.roles.is_empty() {
            let name = self.user.clone().unwrap_or_default();
            return GenericPrincipal::new(Identity::new(name), self.roles.iter().cloned());
        }
        config
            .principal
            .as_ref()
            .map(|p| p.to_principal())
            .unwrap_or_else(GenericPrincipal::anonymous)
    }
}

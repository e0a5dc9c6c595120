//! rolegate init command

use crate::demo::SAMPLE_CATALOG;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write catalog.yaml into
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Overwrite an existing catalog.yaml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.directory)?;

        let path = self.directory.join("catalog.yaml");
        if path.exists() && !self.force {
            anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
        }
        std::fs::write(&path, SAMPLE_CATALOG)?;

        println!("✓ Wrote {}", path.display());
        Ok(())
    }
}

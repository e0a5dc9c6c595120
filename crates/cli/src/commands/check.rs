//! rolegate check command

use super::HostArgs;
use crate::demo::build_manager;
use clap::Args;
use console::style;
use shared::{NullLogger, Principal};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub host: HostArgs,
}

impl CheckCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let config = self.host.load_catalog()?;
        let principal = self.host.principal(&config);
        let manager = build_manager(&config, Arc::new(NullLogger))?;

        let decisions: Vec<_> = manager
            .catalog()
            .modules()
            .iter()
            .map(|descriptor| (descriptor, manager.initializer().authorize(descriptor, &principal)))
            .collect();

        if json {
            let output: Vec<_> = decisions
                .iter()
                .map(|(descriptor, authorization)| {
                    serde_json::json!({
                        "module": descriptor,
                        "authorization": authorization,
                        "loads": authorization.is_granted(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("Checking modules for principal: {}", principal.identity().name);
        for (descriptor, authorization) in &decisions {
            let mark = if authorization.is_granted() {
                style("load").green()
            } else {
                style("skip").yellow()
            };
            println!(
                "  {} {:<12} {:?}  {}",
                mark,
                descriptor.name,
                descriptor.mode,
                authorization.reason()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sample_catalog() {
        let cmd = CheckCommand {
            host: HostArgs {
                roles: vec!["Guest".to_string()],
                ..Default::default()
            },
        };

        assert!(cmd.run(false).is_ok());
        assert!(cmd.run(true).is_ok());
    }
}

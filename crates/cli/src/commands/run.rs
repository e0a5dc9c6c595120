//! rolegate run command

use super::HostArgs;
use crate::demo::{attached_views, build_manager, host_container};
use clap::Args;
use console::style;
use modularity::{ModuleState, StartupReport};
use shared::{error_chain, Logger, Principal, TracingLogger};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct RunCommand {
    #[command(flatten)]
    pub host: HostArgs,

    /// On-demand module to load after startup (repeatable)
    #[arg(short, long = "load")]
    pub loads: Vec<String>,
}

impl RunCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let config = self.host.load_catalog()?;
        let principal = self.host.principal(&config);
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

        let mut manager = build_manager(&config, logger)?;
        tracing::debug!(modules = manager.catalog().len(), principal = %principal.identity().name, "Catalog loaded");
        let mut container = host_container();

        let mut failure = manager.run(&mut container, &principal).err();
        if failure.is_none() {
            for name in &self.loads {
                if let Err(err) = manager.load_module(name, &mut container, &principal) {
                    failure = Some(err);
                    break;
                }
            }
        }

        let report = manager.report();
        let views = attached_views(&container);
        let stats = manager.audit().get_stats();

        if json {
            let output = serde_json::json!({
                "principal": principal.identity(),
                "report": report,
                "views": views,
                "audit": stats,
                "services": container.registered_services(),
                "error": failure.as_ref().map(|e| error_chain(e)),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            let name = &principal.identity().name;
            let roles: Vec<&str> = principal.roles().collect();
            println!(
                "Principal: {} [{}]",
                if name.is_empty() { "(anonymous)" } else { name.as_str() },
                roles.join(", ")
            );
            print_report(&report);

            println!();
            println!("Views:");
            if views.is_empty() {
                println!("  (none)");
            }
            for (region, attached) in &views {
                println!("  {}: {}", region, attached.join(", "));
            }

            println!();
            println!(
                "Audit: {} initialized, {} skipped, {} failed",
                stats.initialized_count, stats.skipped_count, stats.failure_count
            );
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

fn print_report(report: &StartupReport) {
    println!("Modules:");
    for module in &report.modules {
        let state = match module.state {
            ModuleState::Initialized => style(module.state.to_string()).green(),
            ModuleState::Skipped => style(module.state.to_string()).yellow(),
            ModuleState::Failed => style(module.state.to_string()).red(),
            _ => style(module.state.to_string()).dim(),
        };
        println!("  {:<12} {}", module.name, state);
    }
}

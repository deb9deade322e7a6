use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use anyhow::Result;
use auditflow_core::discover_project_root;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Log { command } => {
            let root = discover_project_root(cli.project_root.as_deref())?;
            let config = Config::load(&root)?;
            handlers::log_event::handle(&config.session_paths(&root), command)
        }

        // Hook payloads may carry their own cwd, so root resolution is
        // deferred to the handler.
        Commands::Hook { command } => handlers::hook::handle(cli.project_root.as_deref(), command),

        Commands::Render { session_id } => {
            let root = discover_project_root(cli.project_root.as_deref())?;
            let config = Config::load(&root)?;
            handlers::render::handle(&root, &config, session_id.as_deref())
        }
    }
}

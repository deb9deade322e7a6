use crate::args::LogCommand;
use anyhow::Result;
use auditflow_core::SessionPaths;
use auditflow_store::Recorder;

pub fn handle(paths: &SessionPaths, command: LogCommand) -> Result<()> {
    match command {
        LogCommand::CommandStart {
            session_id,
            command,
            arguments,
        } => {
            Recorder::new(paths.clone(), session_id).log_command_start(&command, &arguments)?;
        }

        LogCommand::AgentStart { session_id, agent } => {
            Recorder::new(paths.clone(), session_id).log_agent_start(&agent)?;
        }

        LogCommand::AgentStop {
            session_id,
            agent,
            duration_ms,
            status,
        } => {
            Recorder::new(paths.clone(), session_id).log_agent_stop(
                &agent,
                duration_ms,
                &status,
            )?;
        }

        LogCommand::HookExecuted {
            session_id,
            hook,
            trigger_agent,
            outcome,
        } => {
            Recorder::new(paths.clone(), session_id).log_hook_executed(
                &hook,
                &trigger_agent,
                &outcome,
            )?;
        }

        LogCommand::SkillDiscovery {
            session_id,
            query,
            matched_skills,
            route_type,
        } => {
            Recorder::new(paths.clone(), session_id).log_skill_discovery(
                &query,
                split_skills(&matched_skills),
                &route_type,
            )?;
        }
    }

    Ok(())
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

use crate::args::HookCommand;
use crate::config::Config;
use crate::handlers::render;
use anyhow::Result;
use auditflow_core::discover_project_root;
use auditflow_store::Recorder;
use serde::Deserialize;
use std::io::Read;

/// Payload the orchestration host pipes into lifecycle hooks.
///
/// Fields vary by hook kind; everything is optional so a payload from a
/// newer host never fails to decode outright.
#[derive(Debug, Deserialize)]
struct HookPayload {
    #[serde(default)]
    session_id: Option<String>,

    #[serde(default)]
    cwd: Option<String>,

    #[serde(default)]
    subagent_name: Option<String>,

    /// Older hosts send agent_name instead of subagent_name
    #[serde(default)]
    agent_name: Option<String>,

    #[serde(default)]
    duration_ms: Option<u64>,

    #[serde(default)]
    status: Option<String>,
}

impl HookPayload {
    fn agent(&self) -> Option<&str> {
        self.subagent_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.agent_name.as_deref().filter(|name| !name.is_empty()))
    }
}

/// Run one hook entry point against the payload on stdin.
///
/// Blank or undecodable stdin is a silent success: a hook must never
/// block the host over a payload it does not understand.
pub fn handle(flag_root: Option<&str>, command: HookCommand) -> Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    if input.trim().is_empty() {
        return Ok(());
    }

    let Ok(payload) = serde_json::from_str::<HookPayload>(&input) else {
        return Ok(());
    };

    let root = discover_project_root(payload.cwd.as_deref().or(flag_root))?;
    let config = Config::load(&root)?;
    let paths = config.session_paths(&root);

    match command {
        HookCommand::AgentStart => {
            let (Some(session_id), Some(agent)) = (payload.session_id.as_deref(), payload.agent())
            else {
                return Ok(());
            };
            Recorder::new(paths, session_id).log_agent_start(agent)?;
        }

        HookCommand::AgentStop => {
            let (Some(session_id), Some(agent)) = (payload.session_id.as_deref(), payload.agent())
            else {
                return Ok(());
            };
            Recorder::new(paths, session_id).log_agent_stop(
                agent,
                payload.duration_ms.unwrap_or(0),
                payload.status.as_deref().unwrap_or("success"),
            )?;
        }

        HookCommand::SessionEnd => {
            render::handle(&root, &config, payload.session_id.as_deref())?;
        }
    }

    Ok(())
}

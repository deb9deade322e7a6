use crate::stack::AgentStack;
use crate::{AuditLog, Result};
use auditflow_core::SessionPaths;
use auditflow_types::{
    AgentStartPayload, AgentStopPayload, AuditEvent, CommandStartPayload, EventPayload,
    HookExecutedPayload, SkillDiscoveryPayload, validate_session_id,
};
use chrono::{SecondsFormat, Utc};

/// Recording facade for one session: stamps timestamps, couples agent
/// start/stop to the call stack, and appends to the audit log.
///
/// An invalid session id turns every method into a silent no-op; audit
/// recording must never surface an error into the host's hook pipeline.
pub struct Recorder {
    paths: SessionPaths,
    session_id: String,
}

impl Recorder {
    pub fn new(paths: SessionPaths, session_id: impl Into<String>) -> Self {
        Self {
            paths,
            session_id: session_id.into(),
        }
    }

    pub fn log_command_start(&self, command: &str, arguments: &str) -> Result<()> {
        self.append(EventPayload::CommandStart(CommandStartPayload {
            command: command.to_string(),
            arguments: arguments.to_string(),
        }))
    }

    /// Push onto the call stack, then record the pre-push parent/depth.
    pub fn log_agent_start(&self, agent: &str) -> Result<()> {
        if !validate_session_id(&self.session_id) {
            return Ok(());
        }
        self.paths.ensure_state_dir()?;

        let stack = AgentStack::at(self.paths.agent_stack(&self.session_id));
        let (parent, depth) = stack.push(agent)?;

        self.append(EventPayload::AgentStart(AgentStartPayload {
            agent: agent.to_string(),
            parent,
            depth,
        }))
    }

    /// Pop the call stack, then record the stop.
    pub fn log_agent_stop(&self, agent: &str, duration_ms: u64, status: &str) -> Result<()> {
        if !validate_session_id(&self.session_id) {
            return Ok(());
        }
        self.paths.ensure_state_dir()?;

        AgentStack::at(self.paths.agent_stack(&self.session_id)).pop()?;

        self.append(EventPayload::AgentStop(AgentStopPayload {
            agent: agent.to_string(),
            duration_ms,
            status: status.to_string(),
        }))
    }

    pub fn log_hook_executed(&self, hook: &str, trigger_agent: &str, outcome: &str) -> Result<()> {
        self.append(EventPayload::HookExecuted(HookExecutedPayload {
            hook: hook.to_string(),
            trigger_agent: trigger_agent.to_string(),
            outcome: outcome.to_string(),
        }))
    }

    pub fn log_skill_discovery(
        &self,
        query: &str,
        matched_skills: Vec<String>,
        route_type: &str,
    ) -> Result<()> {
        self.append(EventPayload::SkillDiscovery(SkillDiscoveryPayload {
            query: query.to_string(),
            matched_skills,
            route_type: route_type.to_string(),
        }))
    }

    fn append(&self, payload: EventPayload) -> Result<()> {
        if !validate_session_id(&self.session_id) {
            return Ok(());
        }
        self.paths.ensure_state_dir()?;

        let event = AuditEvent {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            session_id: self.session_id.clone(),
            payload,
        };
        AuditLog::at(self.paths.audit_log(&self.session_id)).append(&event)
    }
}

//! Audit-log line builders for integration tests.
//!
//! Lines are produced through the real event schema so fixture sessions
//! stay honest about the wire format.

use auditflow_types::{
    AgentStartPayload, AgentStopPayload, AuditEvent, CommandStartPayload, EventPayload,
    HookExecutedPayload, SkillDiscoveryPayload,
};

/// A line no decoder should accept, for discard-count coverage.
pub const MALFORMED_LINE: &str = "{ this is not an event";

pub fn command_start(timestamp: &str, session_id: &str, command: &str, arguments: &str) -> String {
    line(
        timestamp,
        session_id,
        EventPayload::CommandStart(CommandStartPayload {
            command: command.to_string(),
            arguments: arguments.to_string(),
        }),
    )
}

pub fn agent_start(
    timestamp: &str,
    session_id: &str,
    agent: &str,
    parent: Option<&str>,
    depth: usize,
) -> String {
    line(
        timestamp,
        session_id,
        EventPayload::AgentStart(AgentStartPayload {
            agent: agent.to_string(),
            parent: parent.map(str::to_string),
            depth,
        }),
    )
}

pub fn agent_stop(
    timestamp: &str,
    session_id: &str,
    agent: &str,
    duration_ms: u64,
    status: &str,
) -> String {
    line(
        timestamp,
        session_id,
        EventPayload::AgentStop(AgentStopPayload {
            agent: agent.to_string(),
            duration_ms,
            status: status.to_string(),
        }),
    )
}

pub fn hook_executed(
    timestamp: &str,
    session_id: &str,
    hook: &str,
    trigger_agent: &str,
    outcome: &str,
) -> String {
    line(
        timestamp,
        session_id,
        EventPayload::HookExecuted(HookExecutedPayload {
            hook: hook.to_string(),
            trigger_agent: trigger_agent.to_string(),
            outcome: outcome.to_string(),
        }),
    )
}

pub fn skill_discovery(
    timestamp: &str,
    session_id: &str,
    query: &str,
    matched_skills: &[&str],
    route_type: &str,
) -> String {
    line(
        timestamp,
        session_id,
        EventPayload::SkillDiscovery(SkillDiscoveryPayload {
            query: query.to_string(),
            matched_skills: matched_skills.iter().map(|s| s.to_string()).collect(),
            route_type: route_type.to_string(),
        }),
    )
}

fn line(timestamp: &str, session_id: &str, payload: EventPayload) -> String {
    serde_json::to_string(&AuditEvent {
        timestamp: timestamp.to_string(),
        session_id: session_id.to_string(),
        payload,
    })
    .expect("fixture event must serialize")
}

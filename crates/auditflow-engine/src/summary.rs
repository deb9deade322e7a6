use auditflow_types::{AuditEvent, EventPayload};
use serde::{Deserialize, Serialize};

/// Session-level aggregates embedded in the flow report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    /// Timestamp of the first event, raw as recorded
    pub started: String,
    /// Timestamp of the last event, raw as recorded
    pub ended: String,
    pub agent_starts: usize,
    pub hooks_executed: usize,
    /// First recorded command, empty when the session had none
    pub command: String,
}

pub fn summarize(events: &[AuditEvent]) -> AuditStats {
    let mut agent_starts = 0;
    let mut hooks_executed = 0;
    let mut command = None;

    for event in events {
        match &event.payload {
            EventPayload::AgentStart(_) => agent_starts += 1,
            EventPayload::HookExecuted(_) => hooks_executed += 1,
            EventPayload::CommandStart(payload) => {
                if command.is_none() {
                    command = Some(payload.command.clone());
                }
            }
            _ => {}
        }
    }

    AuditStats {
        started: events
            .first()
            .map(|e| e.timestamp.clone())
            .unwrap_or_default(),
        ended: events
            .last()
            .map(|e| e.timestamp.clone())
            .unwrap_or_default(),
        agent_starts,
        hooks_executed,
        command: command.unwrap_or_default(),
    }
}

/// Render the chronological audit table: one markdown row per event in
/// append order, 1-based index, wall-clock time, kind, identifier,
/// kind-specific details.
pub fn render_summary(events: &[AuditEvent]) -> String {
    let mut lines = vec!["## Chronological Audit Log".to_string(), String::new()];

    for (i, event) in events.iter().enumerate() {
        let i = i + 1;
        let time = clock_time(event);

        match &event.payload {
            EventPayload::CommandStart(payload) => {
                lines.push(format!(
                    "| {i} | {time} | **COMMAND** | `/{}` | {} |",
                    payload.command,
                    clip(&payload.arguments, 60)
                ));
            }

            EventPayload::AgentStart(payload) => {
                let indent = "→ ".repeat(payload.depth);
                let parent = payload
                    .parent
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .unwrap_or("orchestrator");
                lines.push(format!(
                    "| {i} | {time} | **AGENT START** | {indent}`{}` | parent: {parent} |",
                    payload.agent
                ));
            }

            EventPayload::AgentStop(payload) => {
                lines.push(format!(
                    "| {i} | {time} | **AGENT STOP** | `{}` | status: {}, duration: {}ms |",
                    payload.agent, payload.status, payload.duration_ms
                ));
            }

            EventPayload::HookExecuted(payload) => {
                lines.push(format!(
                    "| {i} | {time} | **HOOK** | `{}` | trigger: {}, outcome: {} |",
                    payload.hook, payload.trigger_agent, payload.outcome
                ));
            }

            EventPayload::SkillDiscovery(payload) => {
                lines.push(format!(
                    "| {i} | {time} | **SKILL** | {} | route: {} |",
                    payload.matched_skills.join(", "),
                    payload.route_type
                ));
            }
        }
    }

    lines.join("\n")
}

/// HH:MM:SS.mmm in the timestamp's own offset; the raw string when the
/// timestamp does not parse.
fn clock_time(event: &AuditEvent) -> String {
    match event.parsed_timestamp() {
        Some(dt) => dt.format("%H:%M:%S%.3f").to_string(),
        None => event.timestamp.clone(),
    }
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

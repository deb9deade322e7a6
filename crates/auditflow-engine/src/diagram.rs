use crate::participant::{ParticipantRegistry, ROOT_ABBREV};
use auditflow_types::{AuditEvent, EventPayload};
use std::collections::HashSet;

/// Label used when an arrow references an agent the participant scan
/// never saw (blank names only; real starts always register).
const UNKNOWN_ABBREV: &str = "X";

/// Render the event stream as a Mermaid sequence diagram.
///
/// Pure function of the input slice: same events, same text. Nesting is
/// replayed from the parent/depth recorded in each `agent_start`; the
/// renderer never rebuilds a call stack of its own, so the diagram shows
/// what the session actually recorded even when the stream is truncated.
pub fn render_diagram(events: &[AuditEvent]) -> String {
    let registry = ParticipantRegistry::from_events(events);

    let mut lines = vec!["sequenceDiagram".to_string()];
    for participant in registry.entries() {
        lines.push(format!(
            "    participant {} as {}",
            participant.abbrev, participant.display
        ));
    }
    lines.push(String::new());

    // Lifelines currently open; render-local, discarded afterwards
    let mut active: HashSet<&str> = HashSet::new();

    for event in events {
        match &event.payload {
            EventPayload::CommandStart(payload) => {
                let args = escape_note_text(&clip(&payload.arguments, 40));
                lines.push(format!(
                    "    Note over {ROOT_ABBREV}: /{} {}",
                    payload.command, args
                ));
            }

            EventPayload::AgentStart(payload) => {
                let abbrev = registry
                    .agent_abbrev(&payload.agent)
                    .unwrap_or(UNKNOWN_ABBREV);
                let caller = payload
                    .parent
                    .as_deref()
                    .and_then(|parent| registry.agent_abbrev(parent))
                    .unwrap_or(ROOT_ABBREV);
                lines.push(format!("    {caller}->>{abbrev}: invoke"));
                lines.push(format!("    activate {abbrev}"));
                active.insert(payload.agent.as_str());
            }

            EventPayload::AgentStop(payload) => {
                // A stop without a matching open start emits nothing
                if active.remove(payload.agent.as_str()) {
                    let abbrev = registry
                        .agent_abbrev(&payload.agent)
                        .unwrap_or(UNKNOWN_ABBREV);
                    lines.push(format!("    {abbrev}-->>{ROOT_ABBREV}: {}", payload.status));
                    lines.push(format!("    deactivate {abbrev}"));
                }
            }

            EventPayload::HookExecuted(payload) => {
                let display = payload
                    .hook
                    .replace(".sh", "")
                    .replace(".py", "")
                    .replace("post-", "");
                let abbrev = registry
                    .agent_abbrev(&payload.trigger_agent)
                    .unwrap_or(ROOT_ABBREV);
                lines.push(format!("    Note right of {abbrev}: hook: {display}"));
            }

            EventPayload::SkillDiscovery(payload) => {
                if !payload.matched_skills.is_empty() {
                    let mut skills = payload
                        .matched_skills
                        .iter()
                        .take(3)
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(" -> ");
                    if payload.matched_skills.len() > 3 {
                        skills.push_str("...");
                    }
                    lines.push(format!("    Note over {ROOT_ABBREV}: skills: {skills}"));
                }
            }
        }
    }

    lines.join("\n")
}

/// Make free text safe inside a diagram note: quotes become apostrophes,
/// newlines collapse, angle brackets display literally, and anything past
/// 50 characters is cut to 47 plus an ellipsis.
fn escape_note_text(text: &str) -> String {
    let mut text = text
        .replace('"', "'")
        .replace('\n', " ")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    if text.chars().count() > 50 {
        text = clip(&text, 47);
        text.push_str("...");
    }
    text
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

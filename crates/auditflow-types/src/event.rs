use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// NOTE: Schema Design Goals
//
// 1. Append-order fidelity: one JSON object per log line, never rewritten.
//    Ordering within a session is the append order; no cross-process merge.
//
// 2. Replayability: `agent_start` carries the parent/depth that the call
//    stack held at record time. Renderers replay these values verbatim
//    instead of re-deriving a stack, so recorded nesting is ground truth
//    even when the stack file was later lost or corrupted.
//
// 3. Tolerant decode: timestamps stay strings in the schema. Consumers
//    parse at display time and fall back to the raw value, so one odd
//    clock never invalidates a record.

/// One record of the per-session audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Event timestamp, RFC 3339 / ISO-8601 as written by the recorder
    pub timestamp: String,

    /// Session this event belongs to
    pub session_id: String,

    /// Event kind and its fields (flattened enum, tagged by "event")
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl AuditEvent {
    /// Parse the recorded timestamp, if it is valid RFC 3339.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventPayload {
    /// A slash command was issued to the orchestrator
    CommandStart(CommandStartPayload),

    /// An agent was invoked (stack pushed before this was written)
    AgentStart(AgentStartPayload),

    /// An agent finished (stack popped before this was written)
    AgentStop(AgentStopPayload),

    /// A lifecycle hook ran
    HookExecuted(HookExecutedPayload),

    /// A skill-routing lookup resolved
    SkillDiscovery(SkillDiscoveryPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandStartPayload {
    /// Command name, without the leading slash
    pub command: String,

    /// Raw argument string as typed by the operator
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStartPayload {
    /// Agent name as registered with the orchestrator
    pub agent: String,

    /// Innermost active agent at start time; None when started by the
    /// orchestrator itself
    #[serde(default)]
    pub parent: Option<String>,

    /// Nesting level at start time (stack length before push)
    #[serde(default)]
    pub depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStopPayload {
    pub agent: String,

    #[serde(default)]
    pub duration_ms: u64,

    /// Free-form outcome, e.g. "success"
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookExecutedPayload {
    /// Hook file name as configured, e.g. "post-review.sh"
    pub hook: String,

    #[serde(default)]
    pub trigger_agent: String,

    #[serde(default)]
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDiscoveryPayload {
    /// Operator prompt, truncated by the recorder
    pub query: String,

    /// Skill names in routing order
    #[serde(default)]
    pub matched_skills: Vec<String>,

    #[serde(default)]
    pub route_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_start_round_trip() {
        let event = AuditEvent {
            timestamp: "2026-08-05T10:00:00.123456+00:00".to_string(),
            session_id: "abc123".to_string(),
            payload: EventPayload::AgentStart(AgentStartPayload {
                agent: "build-runner".to_string(),
                parent: Some("planner".to_string()),
                depth: 1,
            }),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"agent_start\""));
        assert!(json.contains("\"depth\":1"));

        let back: AuditEvent = serde_json::from_str(&json).unwrap();
        match back.payload {
            EventPayload::AgentStart(payload) => {
                assert_eq!(payload.agent, "build-runner");
                assert_eq!(payload.parent.as_deref(), Some("planner"));
                assert_eq!(payload.depth, 1);
            }
            _ => panic!("Wrong payload type"),
        }
    }

    #[test]
    fn test_decodes_wire_format_with_defaults() {
        // parent: null and missing duration_ms are both valid on the wire
        let line = r#"{"timestamp":"2026-08-05T10:00:00+00:00","event":"agent_start","session_id":"s1","agent":"coder","parent":null,"depth":0}"#;
        let event: AuditEvent = serde_json::from_str(line).unwrap();
        match event.payload {
            EventPayload::AgentStart(payload) => {
                assert!(payload.parent.is_none());
                assert_eq!(payload.depth, 0);
            }
            _ => panic!("Wrong payload type"),
        }

        let line = r#"{"timestamp":"t","event":"agent_stop","session_id":"s1","agent":"coder"}"#;
        let event: AuditEvent = serde_json::from_str(line).unwrap();
        match event.payload {
            EventPayload::AgentStop(payload) => {
                assert_eq!(payload.duration_ms, 0);
                assert_eq!(payload.status, "");
            }
            _ => panic!("Wrong payload type"),
        }
    }

    #[test]
    fn test_unknown_event_kind_is_rejected() {
        let line = r#"{"timestamp":"t","event":"teleport","session_id":"s1"}"#;
        assert!(serde_json::from_str::<AuditEvent>(line).is_err());
    }

    #[test]
    fn test_parsed_timestamp_fallback() {
        let event = AuditEvent {
            timestamp: "not-a-timestamp".to_string(),
            session_id: "s1".to_string(),
            payload: EventPayload::CommandStart(CommandStartPayload {
                command: "deploy".to_string(),
                arguments: String::new(),
            }),
        };
        assert!(event.parsed_timestamp().is_none());

        let event = AuditEvent {
            timestamp: "2026-08-05T10:00:00Z".to_string(),
            ..event
        };
        assert!(event.parsed_timestamp().is_some());
    }
}

use crate::Result;
use auditflow_types::AuditEvent;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only NDJSON audit log for one session.
///
/// One JSON object per line, written in arrival order. Prior lines are
/// never rewritten; re-rendering is always safe against a live log.
pub struct AuditLog {
    path: PathBuf,
}

/// Result of a tolerant log decode: the valid events in append order
/// plus the number of lines that did not decode.
pub struct DecodedLog {
    pub events: Vec<AuditEvent>,
    pub discarded: usize,
}

impl AuditLog {
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event as a single JSON line.
    pub fn append(&self, event: &AuditEvent) -> Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Read every decodable event in append order.
    ///
    /// Blank lines are ignored. Lines that fail to decode (malformed
    /// JSON, unknown event kinds) are counted in `discarded` and skipped;
    /// a partially written tail line must not invalidate the session.
    pub fn read_all(&self) -> Result<DecodedLog> {
        let text = std::fs::read_to_string(&self.path)?;

        let mut events = Vec::new();
        let mut discarded = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEvent>(line) {
                Ok(event) => events.push(event),
                Err(_) => discarded += 1,
            }
        }

        Ok(DecodedLog { events, discarded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditflow_types::{AgentStartPayload, CommandStartPayload, EventPayload};

    fn sample_event(payload: EventPayload) -> AuditEvent {
        AuditEvent {
            timestamp: "2026-08-05T10:00:00+00:00".to_string(),
            session_id: "s1".to_string(),
            payload,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let log = AuditLog::at(temp.path().join("audit-log-s1.jsonl"));

        log.append(&sample_event(EventPayload::CommandStart(
            CommandStartPayload {
                command: "deploy".to_string(),
                arguments: String::new(),
            },
        )))
        .unwrap();
        log.append(&sample_event(EventPayload::AgentStart(AgentStartPayload {
            agent: "coder".to_string(),
            parent: None,
            depth: 0,
        })))
        .unwrap();

        let decoded = log.read_all().unwrap();
        assert_eq!(decoded.events.len(), 2);
        assert_eq!(decoded.discarded, 0);
        assert!(matches!(
            decoded.events[0].payload,
            EventPayload::CommandStart(_)
        ));
        assert!(matches!(
            decoded.events[1].payload,
            EventPayload::AgentStart(_)
        ));
    }

    #[test]
    fn test_read_all_skips_malformed_lines() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("audit-log-s1.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"timestamp":"t","event":"command_start","session_id":"s1","command":"go"}"#,
                "\n",
                "not json at all\n",
                "\n",
                r#"{"timestamp":"t","event":"warp_drive","session_id":"s1"}"#,
                "\n",
                r#"{"timestamp":"t","event":"agent_stop","session_id":"s1","agent":"coder","status":"success"}"#,
                "\n",
            ),
        )
        .unwrap();

        let decoded = AuditLog::at(path).read_all().unwrap();
        assert_eq!(decoded.events.len(), 2);
        assert_eq!(decoded.discarded, 2);
    }
}

use crate::summary::AuditStats;

/// Assemble the markdown flow report: session metadata, the diagram
/// verbatim in a fenced block, and the chronological table.
///
/// `log_path` is the raw audit log location, shown so a reader can go
/// from the report back to the source records.
pub fn render_report(
    session_id: &str,
    diagram: &str,
    summary: &str,
    stats: &AuditStats,
    log_path: &str,
) -> String {
    format!(
        "# Agent Flow Report\n\
         \n\
         **Session ID**: `{session_id}`\n\
         **Command**: `/{command}`\n\
         **Started**: {started}\n\
         **Ended**: {ended}\n\
         **Agents Invoked**: {agent_starts}\n\
         **Hooks Executed**: {hooks_executed}\n\
         \n\
         ---\n\
         \n\
         ## Sequence Diagram\n\
         \n\
         ```mermaid\n\
         {diagram}\n\
         ```\n\
         \n\
         ---\n\
         \n\
         {summary}\n\
         \n\
         ---\n\
         \n\
         ## Raw Audit Log\n\
         \n\
         See: `{log_path}`\n",
        command = stats.command,
        started = stats.started,
        ended = stats.ended,
        agent_starts = stats.agent_starts,
        hooks_executed = stats.hooks_executed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render_diagram, render_summary, summarize};
    use auditflow_types::{AgentStartPayload, AuditEvent, CommandStartPayload, EventPayload};

    fn sample_events() -> Vec<AuditEvent> {
        vec![
            AuditEvent {
                timestamp: "2026-08-05T10:00:00+00:00".to_string(),
                session_id: "s1".to_string(),
                payload: EventPayload::CommandStart(CommandStartPayload {
                    command: "deploy".to_string(),
                    arguments: String::new(),
                }),
            },
            AuditEvent {
                timestamp: "2026-08-05T10:00:01+00:00".to_string(),
                session_id: "s1".to_string(),
                payload: EventPayload::AgentStart(AgentStartPayload {
                    agent: "build-runner".to_string(),
                    parent: None,
                    depth: 0,
                }),
            },
        ]
    }

    #[test]
    fn test_report_embeds_metadata_and_diagram() {
        let events = sample_events();
        let diagram = render_diagram(&events);
        let summary = render_summary(&events);
        let stats = summarize(&events);
        let report = render_report(
            "s1",
            &diagram,
            &summary,
            &stats,
            ".claude/.state/audit-log-s1.jsonl",
        );

        assert!(report.starts_with("# Agent Flow Report\n"));
        assert!(report.contains("**Session ID**: `s1`"));
        assert!(report.contains("**Command**: `/deploy`"));
        assert!(report.contains("**Agents Invoked**: 1"));
        assert!(report.contains("```mermaid\nsequenceDiagram\n"));
        assert!(report.contains("## Chronological Audit Log"));
        assert!(report.contains("See: `.claude/.state/audit-log-s1.jsonl`"));
    }

    #[test]
    fn test_report_is_idempotent() {
        let events = sample_events();
        let render = || {
            render_report(
                "s1",
                &render_diagram(&events),
                &render_summary(&events),
                &summarize(&events),
                "log.jsonl",
            )
        };
        assert_eq!(render(), render());
    }
}

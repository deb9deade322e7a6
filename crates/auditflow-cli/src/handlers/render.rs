use crate::config::Config;
use anyhow::{Context, Result};
use auditflow_core::{find_latest_audit_log, session_id_from_log_path};
use auditflow_engine::{render_diagram, render_report, render_summary, summarize};
use auditflow_store::{AuditLog, write_report};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::path::Path;

/// Render one session's audit log into the flow report artifacts.
///
/// Without an explicit session id the most recently modified audit log
/// wins. A missing or empty log is reported on stderr and treated as
/// success: absent audit data must never fail the calling pipeline.
pub fn handle(root: &Path, config: &Config, session_id: Option<&str>) -> Result<()> {
    let paths = config.session_paths(root);

    let (log_path, session_id) = match session_id {
        Some(id) => {
            let path = paths.audit_log(id);
            if !path.exists() {
                eprint_status(&format!("Audit log not found: {}", path.display()));
                return Ok(());
            }
            (path, id.to_string())
        }
        None => match find_latest_audit_log(paths.state_dir()) {
            Some(path) => {
                let id = session_id_from_log_path(&path)
                    .with_context(|| format!("Unrecognized log name: {}", path.display()))?;
                (path, id)
            }
            None => {
                eprint_status("No audit logs found");
                return Ok(());
            }
        },
    };

    let decoded = AuditLog::at(log_path.clone()).read_all()?;
    if decoded.events.is_empty() {
        eprint_status(&format!("No events in audit log: {}", log_path.display()));
        return Ok(());
    }
    if decoded.discarded > 0 {
        eprint_status(&format!(
            "Warning: skipped {} undecodable log line(s)",
            decoded.discarded
        ));
    }

    let diagram = render_diagram(&decoded.events);
    let summary = render_summary(&decoded.events);
    let stats = summarize(&decoded.events);
    let report = render_report(
        &session_id,
        &diagram,
        &summary,
        &stats,
        &display_path(root, &log_path),
    );

    let (report_path, diagram_path) = write_report(&paths, &session_id, &report, &diagram)?;
    eprint_status(&format!("Generated: {}", report_path.display()));
    eprint_status(&format!("Generated: {}", diagram_path.display()));

    // Hook protocol response for the orchestration host
    let response = serde_json::json!({
        "continue": true,
        "systemMessage": format!(
            "Audit report generated: {}",
            display_path(root, &report_path)
        ),
    });
    println!("{response}");

    Ok(())
}

/// Prefer a root-relative path in human-facing text.
fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn eprint_status(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", msg.bright_black());
    } else {
        eprintln!("{}", msg);
    }
}

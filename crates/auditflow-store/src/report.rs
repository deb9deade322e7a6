use crate::Result;
use auditflow_core::SessionPaths;
use std::path::PathBuf;

/// Persist the rendered flow report and the raw diagram for a session.
///
/// Overwrites any prior artifacts for the same session id, so
/// re-rendering is idempotent. Returns `(report_path, diagram_path)`.
pub fn write_report(
    paths: &SessionPaths,
    session_id: &str,
    report_body: &str,
    diagram: &str,
) -> Result<(PathBuf, PathBuf)> {
    paths.ensure_reports_dir()?;

    let report_path = paths.report(session_id);
    std::fs::write(&report_path, report_body)?;

    let diagram_path = paths.diagram(session_id);
    std::fs::write(&diagram_path, diagram)?;

    Ok((report_path, diagram_path))
}

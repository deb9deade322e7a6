//! TestWorld pattern for isolated CLI test environments.

use anyhow::Result;
use assert_cmd::Command;
use auditflow_core::SessionPaths;
use filetime::FileTime;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated project root with audit state directories and a
/// pre-configured `auditflow` command builder.
pub struct TestWorld {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project_root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            project_root,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn paths(&self) -> SessionPaths {
        SessionPaths::new(&self.project_root)
    }

    /// `auditflow` pinned to this world's project root.
    ///
    /// Uses `Command::cargo_bin()` so the lookup works from any crate in
    /// the workspace, not only the one that owns the binary.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("auditflow").expect("auditflow binary not built");
        cmd.arg("--project-root").arg(&self.project_root);
        cmd.env_remove("AUDITFLOW_PROJECT_ROOT");
        cmd
    }

    /// Write a ready-made audit log for a session, one line per entry.
    pub fn write_audit_log(&self, session_id: &str, lines: &[String]) -> Result<PathBuf> {
        let paths = self.paths();
        paths.ensure_state_dir()?;
        let log_path = paths.audit_log(session_id);
        let mut content = lines.join("\n");
        content.push('\n');
        std::fs::write(&log_path, content)?;
        Ok(log_path)
    }

    /// Pin a session log's mtime, for latest-log selection tests.
    pub fn set_log_mtime(&self, session_id: &str, unix_secs: i64) -> Result<()> {
        let log_path = self.paths().audit_log(session_id);
        filetime::set_file_mtime(&log_path, FileTime::from_unix_time(unix_secs, 0))?;
        Ok(())
    }

    pub fn read_audit_log(&self, session_id: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.paths().audit_log(session_id))?)
    }

    pub fn read_report(&self, session_id: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.paths().report(session_id))?)
    }

    pub fn read_diagram(&self, session_id: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.paths().diagram(session_id))?)
    }
}

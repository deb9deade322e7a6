use anyhow::{Context, Result};
use auditflow_core::SessionPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional per-project configuration at `{root}/.claude/audit.toml`.
///
/// ```toml
/// [paths]
/// state_dir = ".claude/.state"
/// reports_dir = ".claude/reports"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Session state directory, relative to the project root
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Report artifact directory, relative to the project root
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_state_dir() -> String {
    SessionPaths::DEFAULT_STATE_DIR.to_string()
}

fn default_reports_dir() -> String {
    SessionPaths::DEFAULT_REPORTS_DIR.to_string()
}

impl Config {
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_from(&project_root.join(".claude/audit.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn session_paths(&self, project_root: &Path) -> SessionPaths {
        SessionPaths::with_dirs(project_root, &self.paths.state_dir, &self.paths.reports_dir)
    }
}

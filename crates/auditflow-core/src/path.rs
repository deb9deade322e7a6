use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

const AUDIT_LOG_PREFIX: &str = "audit-log-";
const AUDIT_LOG_SUFFIX: &str = ".jsonl";

/// Per-project locations of session state and report artifacts.
///
/// State files live under `{root}/.claude/.state` and reports under
/// `{root}/.claude/reports` by default; both directory names can be
/// overridden through configuration.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    state_dir: PathBuf,
    reports_dir: PathBuf,
}

impl SessionPaths {
    pub const DEFAULT_STATE_DIR: &'static str = ".claude/.state";
    pub const DEFAULT_REPORTS_DIR: &'static str = ".claude/reports";

    pub fn new(project_root: &Path) -> Self {
        Self::with_dirs(
            project_root,
            Self::DEFAULT_STATE_DIR,
            Self::DEFAULT_REPORTS_DIR,
        )
    }

    pub fn with_dirs(project_root: &Path, state_dir: &str, reports_dir: &str) -> Self {
        Self {
            state_dir: project_root.join(state_dir),
            reports_dir: project_root.join(reports_dir),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// `audit-log-{session_id}.jsonl` under the state directory
    pub fn audit_log(&self, session_id: &str) -> PathBuf {
        self.state_dir
            .join(format!("{AUDIT_LOG_PREFIX}{session_id}{AUDIT_LOG_SUFFIX}"))
    }

    /// `agent-stack-{session_id}.json` under the state directory
    pub fn agent_stack(&self, session_id: &str) -> PathBuf {
        self.state_dir.join(format!("agent-stack-{session_id}.json"))
    }

    /// `flow-{session_id}.md` under the reports directory
    pub fn report(&self, session_id: &str) -> PathBuf {
        self.reports_dir.join(format!("flow-{session_id}.md"))
    }

    /// `flow-{session_id}.mermaid` under the reports directory
    pub fn diagram(&self, session_id: &str) -> PathBuf {
        self.reports_dir.join(format!("flow-{session_id}.mermaid"))
    }

    pub fn ensure_state_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }

    pub fn ensure_reports_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.reports_dir)?;
        Ok(())
    }
}

/// Discover project root based on priority:
/// 1. explicit_project_root (--project-root flag or hook payload cwd)
/// 2. AUDITFLOW_PROJECT_ROOT environment variable
/// 3. Current working directory
pub fn discover_project_root(explicit_project_root: Option<&str>) -> Result<PathBuf> {
    if let Some(root) = explicit_project_root {
        return Ok(expand_tilde(root));
    }

    if let Ok(env_root) = std::env::var("AUDITFLOW_PROJECT_ROOT") {
        return Ok(expand_tilde(&env_root));
    }

    let cwd = std::env::current_dir()?;
    Ok(cwd)
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

/// Find the most recently modified audit log in the state directory.
///
/// Returns None when the directory does not exist or holds no logs.
pub fn find_latest_audit_log(state_dir: &Path) -> Option<PathBuf> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in WalkDir::new(state_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || session_id_from_log_path(path).is_none() {
            continue;
        }

        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };

        match &latest {
            Some((newest, _)) if *newest >= modified => {}
            _ => latest = Some((modified, path.to_path_buf())),
        }
    }

    latest.map(|(_, path)| path)
}

/// Recover the session id from an `audit-log-{id}.jsonl` file name.
pub fn session_id_from_log_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let id = name
        .strip_prefix(AUDIT_LOG_PREFIX)?
        .strip_suffix(AUDIT_LOG_SUFFIX)?;
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

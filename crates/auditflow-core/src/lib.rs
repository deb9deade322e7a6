mod path;

pub use path::{
    Error, Result, SessionPaths, discover_project_root, expand_tilde, find_latest_audit_log,
    session_id_from_log_path,
};

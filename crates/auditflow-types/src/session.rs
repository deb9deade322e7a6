/// Check that a session id is safe to embed in state file names.
///
/// Session ids are opaque tokens minted by the orchestration host; only
/// alphanumerics, hyphens and underscores are accepted. Anything else
/// (including the empty string) is rejected so a hostile or garbled id
/// can never escape the state directory.
pub fn validate_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

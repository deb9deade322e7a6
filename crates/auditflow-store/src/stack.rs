use crate::Result;
use std::path::{Path, PathBuf};

/// Per-session agent call stack, persisted as a single JSON array of
/// agent names and fully rewritten on every push/pop.
///
/// Last-writer-wins: concurrent agents within one session that interleave
/// push/pop can leave an inconsistent stack. That is accepted — the
/// renderer replays the parent/depth values already committed into
/// `agent_start` events and never reads this file.
pub struct AgentStack {
    path: PathBuf,
}

impl AgentStack {
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Push an agent, returning the (parent, depth) pair that held
    /// immediately before the push.
    pub fn push(&self, agent: &str) -> Result<(Option<String>, usize)> {
        let mut stack = self.read();
        let parent = stack.last().cloned();
        let depth = stack.len();
        stack.push(agent.to_string());
        self.write(&stack)?;
        Ok((parent, depth))
    }

    /// Pop and return the innermost agent; None when the stack is
    /// missing or empty.
    pub fn pop(&self) -> Result<Option<String>> {
        let mut stack = self.read();
        let Some(agent) = stack.pop() else {
            return Ok(None);
        };
        self.write(&stack)?;
        Ok(Some(agent))
    }

    /// Current stack contents; a missing or corrupt file reads as empty.
    pub fn read(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn write(&self, stack: &[String]) -> Result<()> {
        std::fs::write(&self.path, serde_json::to_string(stack)?)?;
        Ok(())
    }
}

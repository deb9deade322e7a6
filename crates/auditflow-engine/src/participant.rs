use auditflow_types::{AuditEvent, EventPayload};
use std::collections::HashSet;

/// Fixed root participant representing the top-level caller.
pub const ROOT_NAME: &str = "Orchestrator";
pub const ROOT_ABBREV: &str = "O";

#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub abbrev: String,
    pub display: String,
}

/// Ordered diagram participants: the root first, then agents in order of
/// first appearance in the event stream. Rebuilt fresh on every render.
#[derive(Debug)]
pub struct ParticipantRegistry {
    entries: Vec<Participant>,
    taken: HashSet<String>,
}

impl ParticipantRegistry {
    /// Scan the stream and register every agent that ever started.
    pub fn from_events(events: &[AuditEvent]) -> Self {
        let mut registry = Self::with_root();
        for event in events {
            if let EventPayload::AgentStart(payload) = &event.payload
                && !payload.agent.is_empty()
            {
                registry.register(&payload.agent);
            }
        }
        registry
    }

    fn with_root() -> Self {
        let root = Participant {
            name: ROOT_NAME.to_string(),
            abbrev: ROOT_ABBREV.to_string(),
            display: ROOT_NAME.to_string(),
        };
        Self {
            entries: vec![root],
            taken: HashSet::from([ROOT_ABBREV.to_string()]),
        }
    }

    fn register(&mut self, name: &str) {
        // The root slot is fixed; an agent that happens to share its name
        // still gets its own entry and a suffixed abbreviation.
        if self.agent_abbrev(name).is_some() {
            return;
        }

        let abbrev = abbreviate(name, &self.taken);
        self.taken.insert(abbrev.clone());
        self.entries.push(Participant {
            name: name.to_string(),
            abbrev,
            display: display_name(name),
        });
    }

    /// Declared participants, root first.
    pub fn entries(&self) -> &[Participant] {
        &self.entries
    }

    /// Abbreviation of a named agent; the fixed root is not an agent.
    pub fn agent_abbrev(&self, name: &str) -> Option<&str> {
        self.entries[1..]
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.abbrev.as_str())
    }
}

/// First letter of each word, uppercased; numeric suffix on collision.
fn abbreviate(name: &str, taken: &HashSet<String>) -> String {
    let base: String = words(name)
        .filter_map(|w| w.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect();

    if !taken.contains(&base) {
        return base;
    }
    let mut i = 2;
    loop {
        let candidate = format!("{base}{i}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

/// "build-runner" -> "Build Runner"
fn display_name(name: &str) -> String {
    words(name)
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(['-', '_', ' ']).filter(|w| !w.is_empty())
}

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "auditflow")]
#[command(about = "Record and visualize agent orchestration audit trails", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project root holding the .claude state directory (falls back to
    /// AUDITFLOW_PROJECT_ROOT, then the working directory)
    #[arg(long, global = true)]
    pub project_root: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append one lifecycle event to a session's audit log
    Log {
        #[command(subcommand)]
        command: LogCommand,
    },

    /// Host hook entry points; the hook payload is read from stdin
    Hook {
        #[command(subcommand)]
        command: HookCommand,
    },

    /// Render a session's audit log into a flow report
    Render {
        /// Explicit session to render; defaults to the most recently
        /// modified audit log
        #[arg(long)]
        session_id: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LogCommand {
    /// A slash command was issued to the orchestrator
    CommandStart {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        command: String,

        /// Raw argument string; may itself start with dashes
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        arguments: String,
    },

    /// An agent was invoked; pushes the per-session call stack
    AgentStart {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        agent: String,
    },

    /// An agent finished; pops the per-session call stack
    AgentStop {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        agent: String,

        #[arg(long, default_value_t = 0)]
        duration_ms: u64,

        #[arg(long, default_value = "success")]
        status: String,
    },

    /// A lifecycle hook ran
    HookExecuted {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        hook: String,

        #[arg(long)]
        trigger_agent: String,

        #[arg(long, default_value = "continue")]
        outcome: String,
    },

    /// A skill-routing lookup resolved
    SkillDiscovery {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        query: String,

        /// Comma-separated skill names in routing order
        #[arg(long, default_value = "")]
        matched_skills: String,

        #[arg(long, default_value = "")]
        route_type: String,
    },
}

#[derive(Subcommand)]
pub enum HookCommand {
    /// SubagentStart: log the agent start from the hook payload
    AgentStart,

    /// SubagentStop: log the agent stop from the hook payload
    AgentStop,

    /// SessionEnd: render the session's flow report
    SessionEnd,
}

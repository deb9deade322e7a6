use auditflow::{Cli, run};
use clap::Parser;

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    // Audit tooling runs inside the host's hook pipeline: report the
    // failure, but never propagate a non-zero exit that would block the
    // encompassing orchestration.
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

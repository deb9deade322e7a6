use auditflow_testing::{TestWorld, fixtures};
use predicates::prelude::*;

fn deploy_session(world: &TestWorld, session_id: &str) {
    world
        .write_audit_log(
            session_id,
            &[
                fixtures::command_start(
                    "2026-08-05T10:00:00.100000+00:00",
                    session_id,
                    "deploy",
                    "--env prod",
                ),
                fixtures::agent_start(
                    "2026-08-05T10:00:01.250000+00:00",
                    session_id,
                    "build-runner",
                    None,
                    0,
                ),
                fixtures::agent_stop(
                    "2026-08-05T10:00:02.500000+00:00",
                    session_id,
                    "build-runner",
                    1200,
                    "success",
                ),
            ],
        )
        .unwrap();
}

#[test]
fn test_render_writes_diagram_and_report() {
    let world = TestWorld::new();
    deploy_session(&world, "s1");

    world
        .command()
        .args(["render", "--session-id", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"continue\":true"));

    let diagram = world.read_diagram("s1").unwrap();
    let expected = [
        "sequenceDiagram",
        "    participant O as Orchestrator",
        "    participant BR as Build Runner",
        "",
        "    Note over O: /deploy --env prod",
        "    O->>BR: invoke",
        "    activate BR",
        "    BR-->>O: success",
        "    deactivate BR",
    ]
    .join("\n");
    assert_eq!(diagram, expected);

    let report = world.read_report("s1").unwrap();
    assert!(report.starts_with("# Agent Flow Report\n"));
    assert!(report.contains("**Command**: `/deploy`"));
    assert!(report.contains("**Agents Invoked**: 1"));
    assert!(report.contains("```mermaid\nsequenceDiagram\n"));
    assert!(report.contains(
        "| 2 | 10:00:01.250 | **AGENT START** | `build-runner` | parent: orchestrator |"
    ));
}

#[test]
fn test_render_without_id_picks_most_recent_log() {
    let world = TestWorld::new();
    deploy_session(&world, "old-run");
    deploy_session(&world, "new-run");
    world.set_log_mtime("old-run", 1_000_000).unwrap();
    world.set_log_mtime("new-run", 2_000_000).unwrap();

    world.command().arg("render").assert().success();

    assert!(world.paths().report("new-run").exists());
    assert!(!world.paths().report("old-run").exists());
}

/// Missing audit data is an operator notice, never a pipeline failure.
#[test]
fn test_render_missing_session_exits_clean() {
    let world = TestWorld::new();

    world
        .command()
        .args(["render", "--session-id", "ghost"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Audit log not found"));

    world
        .command()
        .arg("render")
        .assert()
        .success()
        .stderr(predicate::str::contains("No audit logs found"));

    assert!(!world.paths().reports_dir().exists());
}

#[test]
fn test_render_empty_log_exits_clean() {
    let world = TestWorld::new();
    world.write_audit_log("s1", &[]).unwrap();

    world
        .command()
        .args(["render", "--session-id", "s1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No events in audit log"));

    assert!(!world.paths().report("s1").exists());
}

#[test]
fn test_render_skips_malformed_lines_with_warning() {
    let world = TestWorld::new();
    world
        .write_audit_log(
            "s1",
            &[
                fixtures::command_start("2026-08-05T10:00:00+00:00", "s1", "deploy", ""),
                fixtures::MALFORMED_LINE.to_string(),
                fixtures::agent_start("2026-08-05T10:00:01+00:00", "s1", "coder", None, 0),
            ],
        )
        .unwrap();

    world
        .command()
        .args(["render", "--session-id", "s1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped 1 undecodable"));

    let report = world.read_report("s1").unwrap();
    assert!(report.contains("| 1 |"));
    assert!(report.contains("| 2 |"));
    assert!(!report.contains("| 3 |"));
}

#[test]
fn test_re_render_is_idempotent() {
    let world = TestWorld::new();
    deploy_session(&world, "s1");

    world
        .command()
        .args(["render", "--session-id", "s1"])
        .assert()
        .success();
    let first_report = world.read_report("s1").unwrap();
    let first_diagram = world.read_diagram("s1").unwrap();

    world
        .command()
        .args(["render", "--session-id", "s1"])
        .assert()
        .success();
    assert_eq!(world.read_report("s1").unwrap(), first_report);
    assert_eq!(world.read_diagram("s1").unwrap(), first_diagram);
}

#[test]
fn test_render_honors_configured_reports_dir() {
    let world = TestWorld::new();
    deploy_session(&world, "s1");

    let claude_dir = world.project_root().join(".claude");
    std::fs::write(
        claude_dir.join("audit.toml"),
        "[paths]\nreports_dir = \"build/flow-reports\"\n",
    )
    .unwrap();

    world
        .command()
        .args(["render", "--session-id", "s1"])
        .assert()
        .success();

    assert!(
        world
            .project_root()
            .join("build/flow-reports/flow-s1.md")
            .exists()
    );
    assert!(!world.paths().report("s1").exists());
}

//! Smoke tests for the `ecs-session` binary's command line.

use assert_cmd::Command;
use predicates::prelude::*;

fn ecs_session_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ecs-session"))
}

#[test]
fn test_help_lists_flags() {
    ecs_session_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ECS task sessions"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("--no-summary"));
}

#[test]
fn test_version() {
    ecs_session_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_flag_fails() {
    ecs_session_cmd()
        .arg("--cluster")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cluster"));
}

#[test]
fn test_region_flag_requires_value() {
    ecs_session_cmd().arg("-r").assert().failure();
}

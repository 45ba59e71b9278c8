//! Command-line tests for the azathoth binary.
//!
//! Only paths that exit on their own are exercised here; the running
//! timer is covered by the engine tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn azathoth() -> Command {
    Command::cargo_bin("azathoth").unwrap()
}

#[test]
fn help_describes_options() {
    azathoth()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--work"))
        .stdout(predicate::str::contains("--rest"))
        .stdout(predicate::str::contains("--no-sub-second"));
}

#[test]
fn version_is_printed() {
    azathoth()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn invalid_duration_is_rejected() {
    azathoth()
        .args(["--work", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration 'soon'"));
}

#[test]
fn empty_cycle_is_rejected() {
    azathoth()
        .args(["--work", "0", "--rest", "0s"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("both be zero"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn completions_are_generated() {
    azathoth()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("azathoth"));
}

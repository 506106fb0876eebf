//! CLI surface tests
//!
//! Only --help and --version are exercised here; anything else would reach
//! for the real gcloud binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_describes_both_paths() {
    let mut cmd = Command::cargo_bin("migctl").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("managed instance group"))
        .stdout(predicate::str::contains("close"));
}

#[test]
fn version_flag_works() {
    let mut cmd = Command::cargo_bin("migctl").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("migctl"));
}

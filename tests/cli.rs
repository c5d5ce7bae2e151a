#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn deis_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("deis"));
    cmd.env("HOME", home.path())
        .env_remove("DEIS_PROFILE")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_unknown_command_prints_usage() {
    let home = TempDir::new().unwrap();
    deis_cmd(&home)
        .args(["frobnicate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: deis"))
        .stdout(predicate::str::contains("annotation:list"));
}

#[test]
fn test_topic_help_lists_commands() {
    let home = TempDir::new().unwrap();
    deis_cmd(&home)
        .args(["help", "toleration"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid commands for toleration:"))
        .stdout(predicate::str::contains("toleration:unset"));
}

#[test]
fn test_malformed_annotation_exits_before_login() {
    let home = TempDir::new().unwrap();
    deis_cmd(&home)
        .args(["annotation:set", "-a", "foo", "bad"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "'bad' does not match the pattern 'key=var', ex: MODE=test",
        ));
}

#[test]
fn test_toleration_set_requires_identifier() {
    let home = TempDir::new().unwrap();
    deis_cmd(&home)
        .args(["toleration:set", "-a", "foo", "--key=dedicated"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("toleration identifier is required"));
}

#[test]
fn test_missing_profile_is_not_logged_in() {
    let home = TempDir::new().unwrap();
    deis_cmd(&home)
        .args(["annotation:list", "-a", "foo"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Are you logged in?"));
}

#[test]
fn test_json_errors_are_structured() {
    let home = TempDir::new().unwrap();
    let profile = home.path().join("staging.json");
    fs::write(&profile, "{ not json").unwrap();

    deis_cmd(&home)
        .args(["-c", profile.to_str().unwrap(), "--json", "builds:list", "-a", "foo"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"ok\": false"))
        .stderr(predicate::str::contains("Malformed client configuration"));
}

#[test]
fn test_unreachable_controller_fails_after_progress_line() {
    let home = TempDir::new().unwrap();
    let profile = home.path().join("local.json");
    fs::write(
        &profile,
        r#"{"username":"ops","ssl_verify":true,"controller":"http://127.0.0.1:1","token":"abc"}"#,
    )
    .unwrap();

    deis_cmd(&home)
        .args([
            "-c",
            profile.to_str().unwrap(),
            "--no-progress",
            "toleration:unset",
            "-a",
            "foo",
            "gpu",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Removing Tolerations... "))
        .stdout(predicate::str::contains("done").not());
}

#[test]
fn test_usage_error_has_single_prefix() {
    let home = TempDir::new().unwrap();
    deis_cmd(&home)
        .args(["annotation:list", "-a", "foo", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("Error: unexpected argument '--bogus'"))
        .stderr(predicate::str::contains("error: ").not());
}

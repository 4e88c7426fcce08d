use assert_cmd::Command;
use predicates::prelude::*;

fn command() -> Command {
    Command::cargo_bin("nancy").expect("binary exists")
}

#[test]
fn help_prints_both_flag_sets_and_exits_2() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.current_dir(temp.path()).arg("--help");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("go list -m all | nancy [options]"))
        .stderr(predicate::str::contains("exclude-vulnerability"))
        .stderr(predicate::str::contains("IQ Options:"))
        .stderr(predicate::str::contains("server-url"));
}

#[test]
fn unknown_flag_prints_usage_and_exits_2() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.current_dir(temp.path()).arg("--frobnicate");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("--frobnicate"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_iq_flag_exits_2() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.current_dir(temp.path()).arg("iq").arg("--quiet");

    cmd.assert().code(2).stderr(predicate::str::contains("Usage:"));
}

#[test]
fn version_flag_prints_version() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.current_dir(temp.path()).arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn deprecated_alias_warns_on_stderr() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.current_dir(temp.path()).arg("--noColor");

    cmd.assert().success().stderr(predicate::str::contains("deprecated"));
}

#[test]
fn successful_resolution_is_silent() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = command();
    cmd.current_dir(temp.path()).arg("--quiet").arg("mylockfile.lock");

    cmd.assert().success().stdout(predicate::str::is_empty());
}

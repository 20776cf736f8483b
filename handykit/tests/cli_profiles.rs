//! CLI tests for `handykit` profile commands.
//!
//! Spawns the binary against a temporary profile file and checks exit codes
//! and printed output.

use std::process::Command;

use handykit::exit_codes;
use handykit::io::config::load_config;
use handykit::test_support::{TestWorkspace, profile, profile_with_args};

fn handykit(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_handykit"));
    cmd.current_dir(workspace.path());
    cmd
}

#[test]
fn show_prints_launch_with_fixed_flags() {
    let workspace =
        TestWorkspace::with_profiles(&[("build", profile_with_args("cargo", "build --release"))])
            .expect("workspace");

    let output = handykit(&workspace)
        .args(["show", "build"])
        .output()
        .expect("handykit show");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["name"], "cargo");
    assert_eq!(json["args"], "build --release");
    assert_eq!(json["flags"]["use_shell"], false);
    assert_eq!(json["flags"]["capture_stdout"], true);
    assert_eq!(json["flags"]["capture_stderr"], true);
    assert_eq!(json["flags"]["create_no_window"], true);
}

#[test]
fn show_missing_profile_exits_with_not_found_code() {
    let workspace = TestWorkspace::with_profiles(&[]).expect("workspace");

    let status = handykit(&workspace)
        .args(["show", "nope"])
        .status()
        .expect("handykit show");

    assert_eq!(status.code(), Some(exit_codes::PROFILE_NOT_FOUND));
}

#[test]
fn add_then_remove_updates_file() {
    let workspace = TestWorkspace::with_profiles(&[("ls", profile("ls"))]).expect("workspace");

    let status = handykit(&workspace)
        .args(["add", "fmt", "--exe", "cargo", "--args", "fmt --all"])
        .status()
        .expect("handykit add");
    assert_eq!(status.code(), Some(exit_codes::OK));

    let cfg = load_config(&workspace.config_path()).expect("load");
    assert_eq!(cfg.profiles["fmt"], profile_with_args("cargo", "fmt --all"));

    let output = handykit(&workspace)
        .args(["remove", "ls"])
        .output()
        .expect("handykit remove");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let removed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(removed["name"], "ls");

    let cfg = load_config(&workspace.config_path()).expect("load");
    let names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["fmt"]);
}

#[test]
fn add_existing_profile_exits_with_exists_code() {
    let workspace = TestWorkspace::with_profiles(&[("ls", profile("ls"))]).expect("workspace");

    let status = handykit(&workspace)
        .args(["add", "ls", "--exe", "exa"])
        .status()
        .expect("handykit add");

    assert_eq!(status.code(), Some(exit_codes::PROFILE_EXISTS));
    let cfg = load_config(&workspace.config_path()).expect("load");
    assert_eq!(cfg.profiles["ls"], profile("ls"));
}

#[test]
fn validate_rejects_empty_executable() {
    let workspace = TestWorkspace::with_profiles(&[]).expect("workspace");
    std::fs::write(workspace.config_path(), "[profiles.bad]\nname = \"\"\n").expect("write");

    let status = handykit(&workspace)
        .arg("validate")
        .status()
        .expect("handykit validate");

    assert_eq!(status.code(), Some(exit_codes::INVALID));
}

#[test]
fn list_prints_profile_names_in_order() {
    let workspace =
        TestWorkspace::with_profiles(&[("test", profile("cargo")), ("build", profile("make"))])
            .expect("workspace");

    let output = handykit(&workspace)
        .arg("list")
        .output()
        .expect("handykit list");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "build\ntest\n");
}

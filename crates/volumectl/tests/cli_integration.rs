//! Integration tests for the `volumectl` binary.
//!
//! These run the real binary via `assert_cmd`. Anything that would reach
//! the host's mixer tools is limited to paths that fail before a command
//! runs, or to `--help`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("volumectl")
}

#[test]
fn cli_help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("volumectl"));
}

#[test]
fn cli_version_prints_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_config_json_produces_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "device = \"PCM\"\ncard = \"1\"\n").unwrap();

    let output = cli()
        .args(["--json", "--config"])
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("config --json should produce valid JSON");
    assert_eq!(json["config_file_exists"], true);
    assert_eq!(json["settings"]["device"], "PCM");
    assert_eq!(json["settings"]["card"], "1");
    assert_eq!(json["settings"]["input_device"], "Sidetone");
}

#[test]
fn cli_config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"));
}

#[test]
fn cli_config_init_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    cli()
        .arg("--config")
        .arg(&path)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(loaded)"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("card = \"0\""));
}

// ── --verbose flag ──

#[test]
fn cli_verbose_flag_accepted() {
    cli().args(["-v", "config"]).assert().success();
}

#[test]
fn cli_verbose_long_flag_accepted() {
    cli().args(["--verbose", "config"]).assert().success();
}

// ── Range validation happens before any tool runs ──

#[cfg(unix)]
#[test]
fn cli_set_above_range_fails() {
    cli()
        .args(["set", "150"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of valid range"));
}

#[cfg(unix)]
#[test]
fn cli_set_negative_fails() {
    cli()
        .args(["set", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("volume -5 is out of valid range"));
}

#[test]
fn cli_set_requires_number() {
    cli().args(["set", "loud"]).assert().failure();
}

#[test]
fn cli_stream_requires_sink_id() {
    cli().args(["stream", "mute"]).assert().failure();
}

#[test]
fn cli_sidetone_rejects_unknown_action() {
    cli().args(["sidetone", "toggle"]).assert().failure();
}

// ── Subcommand help ──

#[test]
fn cli_get_help_succeeds() {
    cli()
        .args(["get", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("volume"));
}

#[test]
fn cli_mute_help_succeeds() {
    cli()
        .args(["mute", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mute"));
}

#[test]
fn cli_unmute_help_succeeds() {
    cli()
        .args(["unmute", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unmute"));
}

#[test]
fn cli_sidetone_help_succeeds() {
    cli()
        .args(["sidetone", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sidetone"));
}

#[test]
fn cli_stream_help_succeeds() {
    cli()
        .args(["stream", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PulseAudio"));
}

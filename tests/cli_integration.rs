// CLI integration tests for the extract and compile flows.
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

fn cmd(cwd: &Path) -> Command {
    let exe = env!("CARGO_BIN_EXE_distrokit");
    let mut command = Command::new(exe);
    command.current_dir(cwd).env_remove("RUST_LOG");
    command
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).expect("utf8")
}

fn notices(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<Value>(line).expect("notice json"))
        .collect()
}

fn seed_distros(root: &Path) -> std::path::PathBuf {
    let distros = root.join("data").join("distros");
    fs::create_dir_all(&distros).expect("mkdir");
    fs::write(distros.join("ubuntu.json"), r#"{"name":"ubuntu"}"#).expect("write");
    fs::write(distros.join("broken.json"), "{invalid}").expect("write");
    distros
}

#[test]
fn extract_prints_fenced_payload() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("curl_output.txt"),
        r#"{"rawData": "```json\n{\"a\":1}\n```"}"#,
    )
    .expect("write");

    let output = cmd(temp.path()).arg("extract").output().expect("extract");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\n  \"a\": 1\n}\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn extract_missing_input_reports_and_exits_zero() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd(temp.path()).arg("extract").output().expect("extract");
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let reported = notices(&output);
    assert_eq!(reported.len(), 1);
    let notice = &reported[0]["notice"];
    assert_eq!(notice["cmd"], "extract");
    assert_eq!(notice["details"]["error_kind"], "not-found");
    assert!(
        notice["message"]
            .as_str()
            .expect("message")
            .starts_with("curl_output.txt not found")
    );
}

#[test]
fn extract_malformed_payload_prints_nothing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let input = temp.path().join("capture.txt");
    fs::write(&input, r#"{"rawData": "```json\n{not json}\n```"}"#).expect("write");

    let output = cmd(temp.path())
        .args(["extract", "--input", input.to_str().unwrap()])
        .output()
        .expect("extract");
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let reported = notices(&output);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0]["notice"]["details"]["error_kind"], "parse");
    assert_eq!(reported[0]["notice"]["kind"], "failed");
}

#[test]
fn extract_reads_stdin_when_input_is_dash() {
    use std::io::Write;
    use std::process::Stdio;

    let temp = tempfile::tempdir().expect("tempdir");
    let mut child = cmd(temp.path())
        .args(["extract", "--input", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"{"rawData": "[1, 2]"}"#)
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[\n  1,\n  2\n]\n");
}

#[test]
fn compile_skips_broken_file_and_writes_array() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_distros(temp.path());

    let output = cmd(temp.path()).arg("compile").output().expect("compile");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Successfully compiled data to data/distributions.json\n"
    );

    let written = fs::read_to_string(temp.path().join("data").join("distributions.json"))
        .expect("read output");
    assert_eq!(written, "[\n  {\n    \"name\": \"ubuntu\"\n  }\n]");

    let reported = notices(&output);
    assert_eq!(reported.len(), 1);
    let notice = &reported[0]["notice"];
    assert_eq!(notice["kind"], "decode");
    assert!(notice["path"].as_str().expect("path").ends_with("broken.json"));
}

#[test]
fn extract_prints_large_integers_verbatim() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(
        temp.path().join("curl_output.txt"),
        r#"{"rawData": "{\"id\": 123456789012345678901234567890}"}"#,
    )
    .expect("write");

    let output = cmd(temp.path()).arg("extract").output().expect("extract");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "{\n  \"id\": 123456789012345678901234567890\n}\n"
    );
}

#[test]
fn compile_reports_one_notice_per_skipped_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let distros = seed_distros(temp.path());
    fs::write(distros.join("fedora.json"), r#"{"name":"fedora"}"#).expect("write");
    fs::write(distros.join("mint.json"), r#"{"name":"mint"}"#).expect("write");
    fs::write(distros.join("cut.json"), r#"{"name":"#).expect("write");
    fs::write(distros.join("bytes.json"), [0xff, 0xfe]).expect("write");

    let output = cmd(temp.path())
        .args(["compile", "--json"])
        .output()
        .expect("compile");
    assert!(output.status.success());

    let summary: Value = serde_json::from_str(stdout(&output)).expect("summary");
    assert_eq!(summary["records"], 3);
    assert_eq!(summary["skipped"], 3);

    let mut kinds: Vec<String> = notices(&output)
        .iter()
        .map(|n| n["notice"]["kind"].as_str().expect("kind").to_string())
        .collect();
    kinds.sort();
    assert_eq!(kinds, vec!["decode", "decode", "read"]);
}

#[test]
fn compile_json_summary_counts_records() {
    let temp = tempfile::tempdir().expect("tempdir");
    let distros = seed_distros(temp.path());
    fs::write(distros.join("fedora.json"), r#"{"name":"fedora"}"#).expect("write");
    let out = temp.path().join("all.json");

    let output = cmd(temp.path())
        .args([
            "compile",
            "--input-dir",
            distros.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("compile");
    assert!(output.status.success());

    let summary: Value = serde_json::from_str(stdout(&output)).expect("summary");
    assert_eq!(summary["records"], 2);
    assert_eq!(summary["skipped"], 1);
    assert_eq!(summary["written"], true);

    let compiled: Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read")).expect("json");
    let names: Vec<&str> = compiled
        .as_array()
        .expect("array")
        .iter()
        .map(|record| record["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["fedora", "ubuntu"]);
}

#[test]
fn compile_missing_directory_reports_and_exits_zero() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd(temp.path()).arg("compile").output().expect("compile");
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(!temp.path().join("data").join("distributions.json").exists());

    let reported = notices(&output);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0]["notice"]["kind"], "list");
}

#[test]
fn compile_alias_runs_with_no_arguments() {
    let temp = tempfile::tempdir().expect("tempdir");
    seed_distros(temp.path());

    let output = Command::new(env!("CARGO_BIN_EXE_compile-distros"))
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("compile-distros");
    assert!(output.status.success());
    assert!(temp.path().join("data").join("distributions.json").exists());
}

#[test]
fn usage_exit_code() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd(temp.path())
        .args(["compile", "--order", "random"])
        .output()
        .expect("compile");
    assert_eq!(output.status.code(), Some(2));

    let text = String::from_utf8_lossy(&output.stderr);
    let line = text.lines().next().expect("error line");
    let err: Value = serde_json::from_str(line).expect("error json");
    assert_eq!(err["error"]["kind"], "Usage");
}

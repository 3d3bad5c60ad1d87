use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn tokenize_prints_treeviz_by_default() {
    let post = temp_file("[b]hi[/b] >>3");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("tokenize").arg(post.path());

    cmd.assert().success().stdout(
        "├─ bold\n│ └─ text: \"hi\"\n├─ text: \" \"\n└─ post_link: >>3\nreferences: 3\n",
    );
}

#[test]
fn tokenize_reads_stdin_as_json() {
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.args(["tokenize", "-", "--format", "json"])
        .write_stdin(">>5");

    let output_pred = predicate::str::contains("\"post_link\"")
        .and(predicate::str::contains("\"references\": [\n    5\n  ]"));
    cmd.assert().success().stdout(output_pred);
}

#[test]
fn tokenize_limit_stops_early() {
    let post = temp_file(">>1 >>2 >>3");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("tokenize").arg(post.path()).args(["--limit", "2"]);

    cmd.assert().success().stdout(
        predicate::str::contains(">>1")
            .and(predicate::str::contains(">>2").not())
            .and(predicate::str::contains("references: 1\n")),
    );
}

#[test]
fn tokenize_unknown_format_fails() {
    let post = temp_file("hello");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("tokenize").arg(post.path()).args(["-f", "nope"]);

    cmd.assert().failure().stderr(
        predicate::str::contains("invalid value 'nope'")
            .and(predicate::str::contains("expected one of: treeviz, json")),
    );
}

#[test]
fn tokenize_missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.args(["tokenize", "does/not/exist.txt"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading does/not/exist.txt"));
}

#[test]
fn config_file_changes_output() {
    let config = temp_config("[treeviz]\nshow_spans = true\n");
    let post = temp_file(">>8");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("--config")
        .arg(config.path())
        .arg("tokenize")
        .arg(post.path());

    cmd.assert()
        .success()
        .stdout("└─ post_link @0..3: >>8\nreferences: 8\n");
}

#[test]
fn replies_prints_index() {
    let thread = temp_file(
        r#"[{"id": 1, "message": "op"}, {"id": 2, "message": ">>1 hi"}, {"id": 3, "message": ">>2 >>9"}]"#,
    );
    let config = temp_config("[json]\npretty = false\n");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("replies")
        .arg(thread.path())
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .success()
        .stdout("{\"1\":[2],\"2\":[3],\"3\":[]}\n");
}

#[test]
fn replies_accepts_thread_object() {
    let thread = temp_file(r#"{"posts": [{"id": 7, "message": ""}, {"id": 8, "message": ">>7"}]}"#);
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("replies").arg(thread.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"7\": [\n    8\n  ]"));
}

#[test]
fn replies_rejects_malformed_dump() {
    let thread = temp_file("not json");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("replies").arg(thread.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error parsing thread dump"));
}

#[test]
fn list_formats_shows_builtins() {
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("Available output formats:")
            .and(predicate::str::contains("  json"))
            .and(predicate::str::contains("  treeviz")),
    );
}

#[test]
fn format_flag_wins_over_config_file() {
    let config = temp_config("[output]\nformat = \"json\"\n");
    let post = temp_file("hi");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("tokenize")
        .arg(post.path())
        .arg("--config")
        .arg(config.path())
        .args(["--format", "treeviz"]);

    cmd.assert().success().stdout("└─ text: \"hi\"\n");
}

#[test]
fn unknown_format_in_config_fails() {
    let config = temp_config("[output]\nformat = \"html\"\n");
    let post = temp_file("hi");
    let mut cmd = cargo_bin_cmd!("boardmark");
    cmd.arg("tokenize").arg(post.path()).arg("-c").arg(config.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error loading config"));
}

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("jidkit")
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_with_stdin(home: &Path, args: &[&str], stdin: &str) -> Output {
    cargo_bin_cmd!("jidkit")
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .write_stdin(stdin)
        .output()
        .expect("run command")
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = run(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run(home, &full);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_parse_prints_canonical_forms() {
    let temp = TempDir::new().expect("temp dir");

    let out = run_cmd(
        temp.path(),
        &["parse", "Juliet@Capulet.LIT/Balcony", "@example.com", "user@example.com/"],
    );
    assert_eq!(
        out,
        "juliet@capulet.lit/Balcony\nexample.com\nuser@example.com\n"
    );

    let items = run_cmd_json(temp.path(), &["parse", "user@example.com/phone"]);
    let item = &items.as_array().expect("array")[0];
    assert_eq!(item["jid"], "user@example.com/phone");
    assert_eq!(item["bare"], "user@example.com");
    assert_eq!(item["localpart"], "user");
    assert_eq!(item["domain"], "example.com");
    assert_eq!(item["resource"], "phone");

    let items = run_cmd_json(temp.path(), &["parse", "example.com"]);
    assert!(items[0]["localpart"].is_null());
    assert!(items[0]["resource"].is_null());
}

#[test]
fn cli_trusted_and_profile_flags_skip_normalization() {
    let temp = TempDir::new().expect("temp dir");

    let out = run_cmd(temp.path(), &["--trusted", "parse", "Juliet@Capulet.LIT"]);
    assert_eq!(out, "Juliet@Capulet.LIT\n");

    let out = run_cmd(temp.path(), &["--stringprep", "empty", "parse", "Juliet@Capulet.LIT"]);
    assert_eq!(out, "Juliet@Capulet.LIT\n");
}

#[test]
fn cli_invalid_input_exits_with_code_3() {
    let temp = TempDir::new().expect("temp dir");

    let output = run(temp.path(), &["parse", "user@"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("parse address"), "stderr: {stderr}");

    let output = run(temp.path(), &["parse", "bad user@example.com"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_resource_replaces_and_clears() {
    let temp = TempDir::new().expect("temp dir");

    let out = run_cmd(temp.path(), &["resource", "u@d/r1", "r2"]);
    assert_eq!(out, "u@d/r2\n");

    let out = run_cmd(temp.path(), &["resource", "u@d/r1", ""]);
    assert_eq!(out, "u@d\n");
}

#[test]
fn cli_compare_uses_canonical_order() {
    let temp = TempDir::new().expect("temp dir");

    assert_eq!(run_cmd(temp.path(), &["compare", "a@y", "a@y/z"]), "less\n");
    assert_eq!(
        run_cmd(temp.path(), &["compare", "USER@example.com", "user@EXAMPLE.com"]),
        "equal\n"
    );

    let result = run_cmd_json(temp.path(), &["compare", "b@x/1", "b@x/2"]);
    assert_eq!(result["ordering"], "less");
    assert_eq!(result["same_bare"], true);
}

#[test]
fn cli_sort_dedupes_with_cache_enabled() {
    let temp = TempDir::new().expect("temp dir");
    let config_dir = temp.path().join("jidkit");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(
        config_dir.join("config.toml"),
        "stringprep = \"basic\"\n[cache]\nenabled = true\ncapacity = 8\n",
    )
    .expect("write config");

    let out = run_cmd(
        temp.path(),
        &["sort", "--bare", "b@x/1", "A@y", "a@y/home", "b@x/2"],
    );
    assert_eq!(out, "a@y\nb@x\n");

    let out = run_cmd(temp.path(), &["sort", "b@x/2", "b@x/1", "b@x"]);
    assert_eq!(out, "b@x\nb@x/1\nb@x/2\n");
}

#[test]
fn cli_missing_config_file_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("nope.toml");

    let output = run(
        temp.path(),
        &["--config", missing.to_str().expect("path"), "parse", "a@b"],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_reads_addresses_from_stdin() {
    let temp = TempDir::new().expect("temp dir");

    let output = run_with_stdin(temp.path(), &["sort"], "b@x/2\n\n  A@y  \nb@x\n");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8(output.stdout).expect("utf8"), "a@y\nb@x\nb@x/2\n");

    let output = run_with_stdin(temp.path(), &["parse"], "User@Example.com/Desk\n");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(
        String::from_utf8(output.stdout).expect("utf8"),
        "user@example.com/Desk\n"
    );
}

#[test]
fn cli_blank_stdin_is_invalid_input() {
    let temp = TempDir::new().expect("temp dir");

    let output = run_with_stdin(temp.path(), &["sort"], "\n   \n");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("no addresses given"), "stderr: {stderr}");
}

#[test]
fn cli_verbose_logs_selected_stringprep() {
    let temp = TempDir::new().expect("temp dir");

    let output = run(
        temp.path(),
        &["--verbose", "--stringprep", "empty", "parse", "a@b"],
    );
    assert!(output.status.success(), "command failed: {:?}", output);
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("stringprep selected"), "stderr: {stderr}");
    assert!(stderr.contains("empty"), "stderr: {stderr}");
}

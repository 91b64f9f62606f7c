//! Drives the built `pish` binary over piped stdin.

use std::{
    fs,
    io::Write,
    path::Path,
    process::{Command, Output, Stdio},
};

use tempfile::TempDir;

fn pish(dir: &TempDir, input: &[u8]) -> Output {
    let config = dir.path().join("pish.toml");
    fs::write(
        &config,
        format!("show_prompt = false\nlog_dir = {:?}\n", dir.path()),
    )
    .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_pish"))
        .env("PISH_CONFIG", &config)
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input).unwrap();
    drop(stdin);

    child.wait_with_output().unwrap()
}

fn marker(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).display().to_string()
}

#[test]
fn exit_ends_the_session_before_anything_runs() {
    let dir = tempfile::tempdir().unwrap();
    let piped = marker(&dir, "piped");
    let later = marker(&dir, "later");

    let output = pish(
        &dir,
        format!("exit | touch {piped}\ntouch {later}\n").as_bytes(),
    );

    assert!(output.status.success(), "{output:?}");
    assert_eq!(output.status.code(), Some(0));
    assert!(!Path::new(&piped).exists());
    assert!(!Path::new(&later).exists());
}

#[test]
fn bad_lines_do_not_end_the_session() {
    let dir = tempfile::tempdir().unwrap();

    let mut input = Vec::new();
    input.extend_from_slice(b"echo before\n");
    input.extend_from_slice(b"ls | | wc\n");
    input.extend_from_slice(b"cd / | cat\n");
    input.extend_from_slice(b"\xff\n");
    input.extend_from_slice(b"echo after\n");

    let output = pish(&dir, &input);

    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "before\nafter\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reports = stderr.lines().filter(|line| line.starts_with("pish: "));
    assert_eq!(reports.count(), 3, "{stderr}");
    assert!(stderr.contains("empty command in pipeline stage 1"), "{stderr}");
    assert!(stderr.contains("cd: cannot be used in a pipeline"), "{stderr}");
    assert!(stderr.contains("command not found"), "{stderr}");
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();

    let output = pish(&dir, b"");

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let output = pish(&dir, b"echo no newline at the end");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "no newline at the end\n"
    );
}

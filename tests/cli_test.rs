use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lazy-slides"))
        .args(args)
        .env_remove("LAZY_SLIDES_LEADING_CONTENT")
        .output()
        .expect("Failed to execute command")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_outline_of_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("talk.md");
    let markdown = "Opening words\n\n# First\n\n```sh\n# not a slide\n```\n\n# Second\nbody\n";
    fs::write(&markdown_path, markdown).expect("Failed to write markdown file");

    let output = run_command(&["outline", "-i", markdown_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        stdout_lines(&output),
        vec!["0\t1\t(untitled)", "1\t3\tFirst", "2\t9\tSecond"]
    );
}

#[test]
fn test_outline_discarding_leading_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("talk.md");
    fs::write(&markdown_path, "preamble\n# Only\n").expect("Failed to write markdown file");

    let output = run_command(&[
        "outline",
        "--discard-leading",
        "-i",
        markdown_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(stdout_lines(&output), vec!["0\t2\tOnly"]);
}

#[test]
fn test_outline_of_builtin_deck() {
    let output = run_command(&["outline"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[1].ends_with("Lazy Speaker Slides"));
    assert!(lines[4].ends_with("Keys definitions"));
}

#[test]
fn test_outline_missing_file_fails() {
    let output = run_command(&["outline", "-i", "/definitely/not/here.md"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}

#[test]
fn test_keys_command() {
    let output = run_command(&["keys"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("spacebar"));
    assert!(text.contains("cycle through themes"));
    assert_eq!(text.lines().count(), 6);
}

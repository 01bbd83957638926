//! End-to-end tests running the `slidecat` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

use crate::common::{create_test_pdf, page_widths, touch};

fn slidecat(dir: &Path, args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_slidecat"));
    command
        .args(args)
        .current_dir(dir)
        .env_remove("SLIDECAT_SOFFICE")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    command
}

fn run(dir: &Path, args: &[&str]) -> Output {
    slidecat(dir, args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("--convert"));
}

#[test]
fn test_unknown_action_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--split", "a.pdf", "b.pdf"]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_too_few_arguments_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--convert", "slides.pptx"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_flag_for_the_other_action_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 1, 100);
    create_test_pdf(&temp_dir.path().join("b.pdf"), 1, 200);

    let output = run(
        temp_dir.path(),
        &["--merge", "--parallel", "out.pdf", "a.pdf", "b.pdf", "--order", ""],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("out.pdf").exists());

    let output = run(temp_dir.path(), &["--convert", "--order", "1", "a.pdf", "out"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_missing_presentation_is_reported_and_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--convert", "slides.pptx", "out/"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("'slides.pptx' does not exist"));
    assert!(temp_dir.path().join("out").is_dir());
}

#[test]
fn test_no_valid_presentations_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "notes.txt");
    let output = run(temp_dir.path(), &["--convert", "notes.txt", "out"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("invalid file type"));
    assert!(stderr(&output).contains("No valid .pptx files found"));
}

#[test]
fn test_missing_converter_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "deck.pptx");
    let output = slidecat(temp_dir.path(), &["--convert", "deck.pptx", "out"])
        .env("SLIDECAT_SOFFICE", "/nonexistent/soffice")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Converter not found"));
}

#[test]
fn test_single_pdf_merge_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("only.pdf"), 1, 100);
    let output = run(temp_dir.path(), &["--merge", "out.pdf", "only.pdf"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("at least 2 valid PDF files"));
    assert!(!temp_dir.path().join("out.pdf").exists());
}

#[test]
fn test_merge_with_order_flag() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 1, 100);
    create_test_pdf(&temp_dir.path().join("b.pdf"), 1, 200);

    let output = run(
        temp_dir.path(),
        &["--merge", "out.pdf", "a.pdf", "b.pdf", "--order", "2,1"],
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Total merge time"));
    assert_eq!(page_widths(&temp_dir.path().join("out.pdf")), vec![200.0, 100.0]);
}

#[test]
fn test_merge_reads_order_from_piped_stdin() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 1, 100);
    create_test_pdf(&temp_dir.path().join("b.pdf"), 1, 200);
    create_test_pdf(&temp_dir.path().join("c.pdf"), 1, 300);

    let mut child = slidecat(temp_dir.path(), &["--merge", "out.pdf", "*.pdf"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"3,1\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(page_widths(&temp_dir.path().join("out.pdf")), vec![300.0, 100.0]);
}

#[test]
fn test_merge_with_closed_stdin_uses_default_order() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 1, 100);
    create_test_pdf(&temp_dir.path().join("b.pdf"), 1, 200);

    let output = run(temp_dir.path(), &["--merge", "out.pdf", "a.pdf", "b.pdf"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Using default order."));
    assert_eq!(page_widths(&temp_dir.path().join("out.pdf")), vec![100.0, 200.0]);
}

#[test]
fn test_quiet_merge_still_lists_files_for_the_prompt() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 1, 100);
    create_test_pdf(&temp_dir.path().join("b.pdf"), 1, 200);

    let output = run(temp_dir.path(), &["--merge", "-q", "out.pdf", "a.pdf", "b.pdf"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("PDF files found:"));
    assert!(out.contains("1: a.pdf"));
    assert!(out.contains("2: b.pdf"));
    assert!(!out.contains("Merging files"));
}

#[test]
fn test_corrupted_pdf_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 1, 100);
    std::fs::write(temp_dir.path().join("bad.pdf"), b"garbage").unwrap();

    let output = run(
        temp_dir.path(),
        &["--merge", "out.pdf", "a.pdf", "bad.pdf", "--order", ""],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("bad.pdf"));
    assert!(!temp_dir.path().join("out.pdf").exists());
}

#[test]
fn test_merge_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    create_test_pdf(&temp_dir.path().join("a.pdf"), 2, 100);
    create_test_pdf(&temp_dir.path().join("b.pdf"), 3, 200);

    let output = run(
        temp_dir.path(),
        &["--merge", "-n", "out.pdf", "a.pdf", "b.pdf", "--order", ""],
    );

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("5 page(s)"));
    assert!(!temp_dir.path().join("out.pdf").exists());
}

#[cfg(unix)]
#[test]
#[serial_test::serial]
fn test_parallel_conversion_with_fake_converter() {
    use crate::common::fake_soffice;

    let temp_dir = TempDir::new().unwrap();
    let soffice = fake_soffice(temp_dir.path());
    for name in ["one.pptx", "two.pptx", "three.pptx"] {
        touch(temp_dir.path(), name);
    }

    let output = slidecat(
        temp_dir.path(),
        &["--convert", "--parallel", "-j", "2", "*.pptx", "pdf"],
    )
    .env("SLIDECAT_SOFFICE", &soffice)
    .output()
    .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Converted 3 of 3 file(s)"));
    assert!(out.contains("Total conversion time"));
    for name in ["one.pdf", "two.pdf", "three.pdf"] {
        assert!(temp_dir.path().join("pdf").join(name).exists());
    }
}

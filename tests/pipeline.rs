use std::fs;

use rsh::result::CommandResult;

use crate::common::{TempFile, run_line};

mod common;

#[test]
fn three_stage_count() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.c", "b.c", "readme.txt", "data.bin", "Makefile"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    let mut output = TempFile::build("rsh-tests-count").unwrap();

    let ret = run_line(&format!(
        "ls {} | grep .c | wc -l > {}",
        dir.path().display(),
        output.path().display()
    ));
    assert_eq!(ret.result, CommandResult::Normal);
    assert!(ret.err.is_empty(), "{}", ret.err);
    assert_eq!(output.contents().trim(), "2");
}

#[test]
fn redirect_in_and_out() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "pear\napple\nfig\n").unwrap();

    let ret = run_line(&format!("sort < {} > {}", input.display(), output.display()));
    assert!(ret.err.is_empty(), "{}", ret.err);
    assert_eq!(fs::read_to_string(&output).unwrap(), "apple\nfig\npear\n");
}

#[test]
fn truncate_then_append() {
    let mut output = TempFile::build("rsh-tests-append").unwrap();
    let path = output.path().display().to_string();

    run_line(&format!("echo first > {path}"));
    run_line(&format!("echo second >> {path}"));
    run_line(&format!("echo third >> {path}"));
    assert_eq!(output.contents(), "first\nsecond\nthird\n");

    run_line(&format!("echo again > {path}"));
    assert_eq!(output.contents(), "again\n");
}

#[test]
fn redirects_around_a_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "b\na\nb\nc\na\n").unwrap();

    let ret = run_line(&format!(
        "sort < {} | uniq | tr a-z A-Z > {}",
        input.display(),
        output.display()
    ));
    assert!(ret.err.is_empty(), "{}", ret.err);
    assert_eq!(fs::read_to_string(&output).unwrap(), "A\nB\nC\n");
}

#[test]
fn unknown_program_in_pipeline() {
    let mut output = TempFile::build("rsh-tests-unknown").unwrap();
    let ret = run_line(&format!(
        "rsh-tests-no-such-program | cat > {}",
        output.path().display()
    ));
    assert_eq!(ret.result, CommandResult::Normal);
    assert_eq!(ret.err, "rsh: rsh-tests-no-such-program: command not found\n");
    // cat saw end-of-stream right away
    assert_eq!(output.contents(), "");
}

#[test]
fn unknown_program() {
    let ret = run_line("rsh-tests-no-such-program --flag");
    assert_eq!(ret.result, CommandResult::Normal);
    assert_eq!(ret.err, "rsh: rsh-tests-no-such-program: command not found\n");
}

#[test]
fn unterminated_redirect_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");

    let ret = run_line(&format!("touch {} | cat <", marker.display()));
    assert_eq!(ret.result, CommandResult::Normal);
    assert_eq!(ret.err, "rsh: syntax error near `<': expected a file name\n");
    assert!(!marker.exists());
}

#[test]
fn missing_input_file_fails_only_that_stage() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");

    let ret = run_line(&format!(
        "cat < {} | wc -l > {}",
        dir.path().join("missing.txt").display(),
        output.display()
    ));
    assert_eq!(ret.result, CommandResult::Normal);
    // the diagnostic comes from the child, not the shell
    assert!(ret.err.is_empty(), "{}", ret.err);
    assert_eq!(fs::read_to_string(&output).unwrap().trim(), "0");
}

#[test]
fn describe_marker_skips_execution() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");

    let ret = run_line(&format!("touch {} PIPE", marker.display()));
    assert_eq!(ret.result, CommandResult::Normal);
    assert!(ret.err.contains("touch"));
    assert!(ret.err.contains(&marker.display().to_string()));
    assert!(!marker.exists());
}

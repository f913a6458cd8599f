use std::{ fs, path::Path, process::{Command, Output} };

use tempfile::tempdir;

fn gladestring(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gladestring"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn writes_header_next_to_input() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("ui")).unwrap();
    fs::write(dir.path().join("ui/main.glade"), "<a>  <b/></a>").unwrap();

    let out = gladestring(&["-f", "ui/main.glade"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(dir.path().join("ui/main.h")).unwrap(),
        "static const char gladestring [] =\n{\n  \"<a><b/></a>\"\n};\n"
    );
}

#[test]
fn long_flag_and_overwrite() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("w.ui"), "<w x='1'/>").unwrap();
    fs::write(dir.path().join("w.h"), "stale contents that are longer than the new header\n".repeat(10)).unwrap();

    let out = gladestring(&["--filename", "w.ui"], dir.path());
    assert!(out.status.success());
    let first = fs::read(dir.path().join("w.h")).unwrap();
    assert_eq!(first, b"static const char gladestring [] =\n{\n  \"<w x=\\\"1\\\"/>\"\n};\n");

    assert!(gladestring(&["--filename", "w.ui"], dir.path()).status.success());
    assert_eq!(fs::read(dir.path().join("w.h")).unwrap(), first);
}

#[test]
fn missing_filename_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let out = gladestring(&[], dir.path());
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("--filename"));
}

#[test]
fn malformed_input_fails_without_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.glade"), "<interface><object>").unwrap();

    let out = gladestring(&["-f", "bad.glade"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to parse bad.glade"));
    assert!(!dir.path().join("bad.h").exists());
}

#[test]
fn unreadable_input_fails() {
    let dir = tempdir().unwrap();
    let out = gladestring(&["-f", "missing.glade"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read missing.glade"));
    assert!(!dir.path().join("missing.h").exists());
}

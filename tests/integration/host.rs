//! Runs programs through a real `ruby`, when one is installed

use std::fs;
use std::process::Command;

use jp_ruby::{run_file, RunError};

fn ruby_available() -> bool {
    Command::new("ruby")
        .arg("-v")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[test]
fn test_run_program() {
    if !ruby_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.jrb");
    fs::write(&path, "クラス 犬\n  定義 鳴く\n    \"ワン\"\n  終わり\n終わり\n発生 \"失敗\" でない限り 犬.新規.鳴く == \"ワン\"\n").unwrap();

    let result = run_file(&path, None, None, &[]);
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_unknown_config_class_only_warns() {
    if !ruby_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yml");
    fs::write(&config, "NoSuchClass:\n  bar: 棒\n").unwrap();
    let path = dir.path().join("main.jrb");
    fs::write(&path, "表示 1\n").unwrap();

    let warnings = run_file(&path, Some(&config), None, &[]).unwrap();
    assert!(warnings.contains("unknown class NoSuchClass"), "{}", warnings);
}

#[test]
fn test_syntax_error_is_localized() {
    if !ruby_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.jrb");
    fs::write(&path, "クラス 犬\n  定義 鳴く\n終わり\n").unwrap();

    let err = run_file(&path, None, None, &[]).unwrap_err();
    let RunError::Syntax { message } = &err else {
        panic!("expected syntax error, got {:?}", err);
    };
    assert!(message.contains("main.jrb"));
    assert!(!message.contains("C犬"));
}

#[test]
fn test_missing_interpreter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.jrb");
    fs::write(&path, "表示 1\n").unwrap();

    let ruby = dir.path().join("no-such-ruby");
    let err = run_file(&path, None, Some(&ruby), &[]).unwrap_err();
    assert!(matches!(err, RunError::Spawn { .. }));
}

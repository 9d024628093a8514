//! Config file → keyword table → transpile

use std::fs;

use jp_ruby::util::config::CONFIG_FILE_NAME;
use jp_ruby::{Config, ConfigError, Transpiler};

#[test]
fn test_project_config_changes_keywords() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "Keyword:\n  class: 組\n  end: 以上\nArray:\n  each: 各々\n",
    )
    .unwrap();
    let input = dir.path().join("main.jrb");

    let config = Config::resolve(Some(&input), None).unwrap();
    let table = config.build_keyword_table().unwrap();
    let out = Transpiler::new(&table).transpile("組 犬\n以上\nクラス\n");
    assert_eq!(out.code, "class C犬\nend\nクラス\n");

    let aliases = config.build_alias_map();
    assert_eq!(aliases.method_for("Array", "各々"), Some("each"));
    assert_eq!(aliases.method_for("Array", "それぞれ"), None);
    assert_eq!(aliases.method_for("Hash", "それぞれ"), Some("each"));
    assert!(aliases.render_prelude().contains(":\"各々\", :\"each\""));
}

#[test]
fn test_conflicting_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.yml");
    fs::write(&path, "Keyword:\n  def: 終わり\n").unwrap();

    let config = Config::resolve(None, Some(&path)).unwrap();
    let err = config.build_keyword_table().unwrap_err();
    assert!(matches!(err, ConfigError::KeywordConflict { .. }));
    assert!(err.to_string().contains("終わり"));
}

#[test]
fn test_invalid_config_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "Keyword:\n  - class\n").unwrap();

    let err = Config::resolve(None, Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::SectionNotMapping { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

//! End-to-end transpilation tests

use std::fs;

use jp_ruby::frontend::lexer::{join_tokens, tokenize};
use jp_ruby::{collect_sources, transpile, transpile_files, write_output, KeywordTable};
use proptest::prelude::*;

#[test]
fn test_program_with_every_construct() {
    let source = r#"# 挨拶プログラム
モジュール 挨拶
  定義 挨拶する(名前)
    表示 "こんにちは、#{名前}さん"
  終わり
終わり

クラス 犬
  取り込む 挨拶
  属性 :名前

  定義 初期化(名前)
    @名前 = 名前
  終わり

  定義 鳴く
    もし @名前 == "ポチ" そして
      表示 'ワン！'
    そうでなければ @名前.空?
      戻す 無
    でなければ
      出力 <<~文
        クゥーン #{@名前}
      文
    終わり
  終わり
終わり

犬.新規("ポチ").鳴く
"#;
    let out = transpile(source);
    assert_eq!(out.type_names, vec!["挨拶".to_string(), "犬".to_string()]);
    assert!(out.code.contains("module C挨拶\n"));
    assert!(out.code.contains("  def 挨拶する(名前)\n"));
    assert!(out.code.contains("    puts \"こんにちは、#{名前}さん\"\n"));
    assert!(out.code.contains("class C犬\n  include C挨拶\n  attr_accessor :名前\n"));
    assert!(out.code.contains("  def initialize(名前)\n    @名前 = 名前\n"));
    assert!(out.code.contains("    if @名前 == \"ポチ\" then\n      puts 'ワン！'\n"));
    assert!(out.code.contains("    elsif @名前.空?\n      return nil\n    else\n"));
    assert!(out.code.contains("      print <<~文\n        クゥーン #{@名前}\n      文\n"));
    assert!(out.code.ends_with("C犬.new(\"ポチ\").鳴く\n"));
    assert_eq!(out.code.lines().count(), source.lines().count());
}

#[test]
fn test_loops_and_blocks() {
    let source = "繰り返し x 中の [1, 2] する\n  次へ もし x == 1\n  表示 x\n終わり\n";
    assert_eq!(
        transpile(source).code,
        "for x in [1, 2] do\n  next if x == 1\n  puts x\nend\n"
    );
}

#[test]
fn test_exceptions() {
    let source = "始まり\n  発生 \"失敗\"\n救済 => e\n  表示 e.message\n確保\n  表示 \"完了\"\n終わり";
    assert_eq!(
        transpile(source).code,
        "begin\n  raise \"失敗\"\nrescue => e\n  puts e.message\nensure\n  puts \"完了\"\nend"
    );
}

#[test]
fn test_non_code_regions_are_untouched() {
    let source = "=begin\nクラス 定義\n=end\nx = %w[クラス 終わり]\ny = /終わり/\n表示 x # 終わり\n__END__\nクラス\n";
    let out = transpile(source).code;
    assert_eq!(
        out,
        "=begin\nクラス 定義\n=end\nx = %w[クラス 終わり]\ny = /終わり/\nputs x # 終わり\n__END__\nクラス\n"
    );
}

#[test]
fn test_code_resumes_after_nested_heredoc() {
    let source = "x = <<A\n#{<<B}\nクラス\nB\nクラス\nA\nもし x\n終わり\n";
    assert_eq!(
        transpile(source).code,
        "x = <<A\n#{<<B}\nクラス\nB\nクラス\nA\nif x\nend\n"
    );
}

#[test]
fn test_batch_transpile_to_out_dir() {
    let input = tempfile::tempdir().unwrap();
    let nested = input.path().join("lib");
    fs::create_dir_all(&nested).unwrap();
    fs::write(input.path().join("main.jrb"), "表示 1\n").unwrap();
    fs::write(nested.join("犬.jrb"), "クラス 犬\n終わり\n").unwrap();
    fs::write(input.path().join("notes.txt"), "クラス").unwrap();

    let sources = collect_sources(&[input.path().to_path_buf()]).unwrap();
    assert_eq!(sources.len(), 2);

    let table = KeywordTable::default();
    let results = transpile_files(&sources, &table);
    let out = tempfile::tempdir().unwrap();
    for (source, result) in sources.iter().zip(results) {
        write_output(source, &result.unwrap(), out.path()).unwrap();
    }

    assert_eq!(fs::read_to_string(out.path().join("main.rb")).unwrap(), "puts 1\n");
    assert_eq!(
        fs::read_to_string(out.path().join("lib").join("犬.rb")).unwrap(),
        "class C犬\nend\n"
    );
}

#[test]
fn test_batch_missing_file_reports_error() {
    let missing = std::path::PathBuf::from("/nonexistent/main.jrb");
    let sources = collect_sources(&[missing]).unwrap();
    let results = transpile_files(&sources, &KeywordTable::default());
    assert!(results[0].is_err());
}

/// Lines of plausible source built from keywords, names and literals
fn source_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("クラス 犬"),
        Just("定義 走る"),
        Just("終わり"),
        Just("もし 真"),
        Just("表示 \"#{名前}\""),
        Just("x = <<~EOS\n本文\nEOS"),
        Just("# コメント"),
        Just("%w[a b]"),
        Just("=begin\n説明\n=end"),
        Just("'文字列'"),
        Just("10 / 2"),
    ];
    prop::collection::vec(piece, 0..20).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn prop_line_count_preserved(source in source_strategy()) {
        let out = transpile(&source);
        prop_assert_eq!(out.code.matches('\n').count(), source.matches('\n').count());
    }

    #[test]
    fn prop_lexer_is_lossless(source in source_strategy()) {
        prop_assert_eq!(join_tokens(&tokenize(&source)), source);
    }
}

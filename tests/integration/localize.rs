//! Transpile → host diagnostic → localize

use jp_ruby::frontend::{localize, DiagnosticLocalizer};
use jp_ruby::{KeywordTable, Transpiler};

#[test]
fn test_syntax_error_round_trip() {
    let table = KeywordTable::default();
    let out = Transpiler::new(&table).transpile("クラス 犬\n  定義 吠える\n終わり\n");

    // What the host reports for the transpiled code
    let diagnostic = "main.jrb:3: syntax errors found\n  1 | class C犬\n  2 |   def 吠える\n> 3 | end\n    |    ^ expected an `end` to close the `class` statement\n";
    let message = localize(diagnostic, &table, &out.type_names);

    assert_eq!(
        message,
        "main.jrb:3: syntax errors found\n  1 | クラス 犬\n  2 |   定義 吠える\n> 3 | 終わり\n    |    ^ expected an `終わり` to close the `クラス` statement\n"
    );
}

#[test]
fn test_runtime_error_names_type() {
    let table = KeywordTable::default();
    let localizer = DiagnosticLocalizer::new(&table);
    let message = localizer.localize(
        "main.jrb:5:in 'C犬#吠える': undefined local variable or method 'x' for an instance of C犬 (NameError)",
        &["犬"],
    );
    assert_eq!(
        message,
        "main.jrb:5:in '犬#吠える': undefined local variable or method 'x' for an instance of 犬 (NameError)"
    );
}

#[test]
fn test_undeclared_prefix_is_kept() {
    let table = KeywordTable::default();
    let message = localize("uninitialized constant Cat (NameError)", &table, &["犬"]);
    assert_eq!(message, "uninitialized constant Cat (NameError)");
}

#[test]
fn test_empty_table_leaves_code_lines() {
    let table = KeywordTable::new(Vec::<(String, String)>::new());
    let message = localize("  1 | class C犬", &table, &["犬"]);
    assert_eq!(message, "  1 | class 犬");
}

//! i18n tests

use super::*;

#[test]
fn test_msg_key() {
    assert_eq!(MSG::LexStart.key(), "lex_start");
    assert_eq!(MSG::SyntaxErrorHeader.key(), "syntax_error_header");
}

#[test]
fn test_available_langs() {
    let langs = available_langs();
    assert!(langs.contains(&"en"));
    assert!(langs.contains(&"ja"));
}

#[test]
fn test_t_with_lang() {
    assert_eq!(t_simple(MSG::SyntaxErrorHeader, "en"), "Syntax error");
    assert_eq!(t_simple(MSG::SyntaxErrorHeader, "ja"), "構文エラー");
}

#[test]
fn test_t_unknown_lang_falls_back_to_english() {
    assert_eq!(t_simple(MSG::ErrorHeader, "fr"), "Error");
}

#[test]
fn test_t_substitutes_args() {
    let result = t(MSG::TranspileWrote, "en", Some(&[&"a.jrb", &"a.rb"]));
    assert_eq!(result, "Wrote a.jrb -> a.rb");
}

#[test]
fn test_every_key_in_both_catalogues() {
    let all = [
        MSG::LexStart,
        MSG::LexComplete,
        MSG::TranspileStart,
        MSG::TypeNamesCollected,
        MSG::TranspileComplete,
        MSG::LocalizeStart,
        MSG::LocalizerPatternFailed,
        MSG::ConfigDiscovered,
        MSG::ConfigDefault,
        MSG::ConfigLoaded,
        MSG::HostSpawn,
        MSG::HostExit,
        MSG::TranspileWrote,
        MSG::TranspileBatch,
        MSG::SyntaxErrorHeader,
        MSG::RunErrorHeader,
        MSG::ConfigErrorHeader,
        MSG::ErrorHeader,
    ];
    for lang in ["en", "ja"] {
        for id in all {
            assert_ne!(t_simple(id, lang), id.key(), "{} missing in {}", id.key(), lang);
        }
    }
}

//! Heredoc tests

use super::*;
use TokenKind::*;

#[test]
fn test_squiggly_heredoc() {
    assert_eq!(values("x = <<~EOS\n  こんにちは\nEOS\n"), vec![
        "x",
        " ",
        "=",
        " ",
        "<<~EOS",
        "\n",
        "  こんにちは\n",
        "EOS",
        "\n",
    ]);
}

#[test]
fn test_heredoc_body_is_string_part() {
    let tokens = tokenize("<<EOS\nクラス 終わり\nEOS");
    assert_eq!(tokens[2].kind, StringPart);
    assert_eq!(tokens[2].text, "クラス 終わり\n");
    assert_eq!(tokens[3].kind, Other);
    assert_eq!(tokens[3].text, "EOS");
}

#[test]
fn test_single_quoted_heredoc_has_no_interpolation() {
    assert_eq!(pairs("<<'EOS'\n#{x}\nEOS"), vec![
        (Other, "<<'EOS'"),
        (Space, "\n"),
        (StringPart, "#{x}\n"),
        (Other, "EOS"),
    ]);
}

#[test]
fn test_heredoc_interpolation() {
    assert_eq!(pairs("<<EOS\na#{名前}b\nEOS"), vec![
        (Other, "<<EOS"),
        (Space, "\n"),
        (StringPart, "a"),
        (InterpolationBegin, "#{"),
        (Word, "名前"),
        (InterpolationEnd, "}"),
        (StringPart, "b\n"),
        (Other, "EOS"),
    ]);
}

#[test]
fn test_code_after_opener_is_lexed_first() {
    assert_eq!(values("表示(<<EOS, 1)\nbody\nEOS\n"), vec![
        "表示", "(", "<<EOS", ",", " ", "1", ")", "\n", "body\n", "EOS", "\n",
    ]);
}

#[test]
fn test_two_heredocs_fifo() {
    assert_eq!(values("f(<<A, <<B)\na\nA\nb\nB\n"), vec![
        "f", "(", "<<A", ",", " ", "<<B", ")", "\n", "a\n", "A", "\n", "b\n", "B", "\n",
    ]);
}

#[test]
fn test_indented_closer() {
    assert_eq!(values("<<-EOS\n  x\n  EOS\n"), vec![
        "<<-EOS", "\n", "  x\n", "  EOS", "\n",
    ]);
}

#[test]
fn test_closer_must_be_whole_line() {
    let tokens = tokenize("<<EOS\nEOS2\nEOS");
    assert_eq!(tokens[2].text, "EOS2\n");
    assert_eq!(tokens[3].text, "EOS");
}

#[test]
fn test_unterminated_heredoc() {
    let source = "<<EOS\nbody";
    let tokens = tokenize(source);
    assert_eq!(tokens.last().map(|t| (t.kind, t.text)), Some((StringPart, "body")));
    assert_eq!(join_tokens(&tokens), source);
}

#[test]
fn test_heredoc_opened_inside_heredoc_interpolation() {
    let source = "x = <<A\n#{<<B}\nb\nB\na\nA\n終わり\n";
    let tokens = tokenize(source);
    assert_eq!(pairs(source)[5..], [
        (Space, "\n"),
        (InterpolationBegin, "#{"),
        (Other, "<<B"),
        (InterpolationEnd, "}"),
        (StringPart, "\n"),
        (StringPart, "b\n"),
        (Other, "B"),
        (StringPart, "\n"),
        (StringPart, "a\n"),
        (Other, "A"),
        (Space, "\n"),
        (Word, "終わり"),
        (Space, "\n"),
    ]);
    assert_eq!(join_tokens(&tokens), source);
}

//! Lexer unit tests
//!
//! Organized by topic:
//! - basic: words, spaces, sigils, numbers, operators
//! - literals: quoted strings, regexes, percent literals, interpolation
//! - heredoc: heredoc openers, bodies and closers
//! - comments: line comments, `=begin` blocks, `__END__`
//! - fuzz: losslessness over generated input

use crate::frontend::lexer::{join_tokens, tokenize, Lexer, LexerState, TokenKind};

mod heredoc;

/// Token texts in order
fn values(source: &str) -> Vec<&str> {
    tokenize(source).into_iter().map(|t| t.text).collect()
}

/// Token kinds in order
fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

/// (kind, text) pairs in order
fn pairs(source: &str) -> Vec<(TokenKind, &str)> {
    tokenize(source)
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

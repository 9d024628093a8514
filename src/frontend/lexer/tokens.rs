//! Token types

use std::fmt;

use serde::Serialize;

/// Token kind
///
/// The lexer only classifies as far as the rewrite pass needs: anything that
/// is not a word, a literal body, a comment, an interpolation boundary or
/// whitespace is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Identifier or keyword, including a trailing `?` or `!`
    Word,
    /// Literal body content (strings, regexes, heredocs, percent literals)
    StringPart,
    /// Line comment, block comment line, or `__END__` data
    Comment,
    /// `#{` inside an interpolating literal
    #[serde(rename = "interp_begin")]
    InterpolationBegin,
    /// The `}` closing an interpolation
    #[serde(rename = "interp_end")]
    InterpolationEnd,
    /// Horizontal whitespace run, or a single newline
    Space,
    /// Operators, punctuation, delimiters, numbers, sigil variables
    Other,
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            TokenKind::Word => "word",
            TokenKind::StringPart => "string_part",
            TokenKind::Comment => "comment",
            TokenKind::InterpolationBegin => "interp_begin",
            TokenKind::InterpolationEnd => "interp_end",
            TokenKind::Space => "space",
            TokenKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Token
///
/// `text` borrows the exact slice of source that was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Create a new token
    #[inline]
    pub fn new(
        kind: TokenKind,
        text: &'src str,
    ) -> Self {
        Self { kind, text }
    }

    /// Whether this token is whitespace (including newlines)
    #[inline]
    pub fn is_space(&self) -> bool {
        self.kind == TokenKind::Space
    }

    /// Whether this token is a word
    #[inline]
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Reassemble source text from a token sequence
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
    let len = tokens.iter().map(|t| t.text.len()).sum();
    let mut out = String::with_capacity(len);
    for token in tokens {
        out.push_str(token.text);
    }
    out
}

//! Lexer state management
//! The state stack frames and the heredoc queue entries

/// One frame of the lexer state stack
///
/// The bottom frame is always `Code`. Literal frames sit on top of the code
/// that opened them, and `Interpolation` sits on top of the literal it
/// re-enters code from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexerState {
    Code,
    DoubleQuotedString,
    SingleQuotedString,
    LineComment,
    BlockComment,
    Regex,
    Heredoc(HeredocFrame),
    Interpolation { depth: usize },
    PercentLiteral(PercentLiteralFrame),
    Backtick,
}

impl LexerState {
    /// Whether the code dispatch rules apply in this state
    #[inline]
    pub fn is_code(&self) -> bool {
        matches!(self, LexerState::Code | LexerState::Interpolation { .. })
    }
}

/// A heredoc whose opener has been seen but whose body has not started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHeredoc {
    pub delimiter: String,
    pub allows_interpolation: bool,
}

/// An active heredoc body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeredocFrame {
    pub delimiter: String,
    pub allows_interpolation: bool,
}

impl From<PendingHeredoc> for HeredocFrame {
    fn from(pending: PendingHeredoc) -> Self {
        Self {
            delimiter: pending.delimiter,
            allows_interpolation: pending.allows_interpolation,
        }
    }
}

/// A bracket-delimited percent literal (`%q{...}`, `%w[...]`, `%r(...)`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentLiteralFrame {
    pub opener: char,
    pub closer: char,
    /// Starts at 1; an unescaped opener inside the body increments it
    pub nest_depth: usize,
    pub allows_interpolation: bool,
    /// `%r` literals take trailing option letters on the closer
    pub is_regex: bool,
}

impl PercentLiteralFrame {
    /// Build a frame for `%` + optional type letter + bracket opener.
    ///
    /// Returns `None` when `letter` is not a percent-literal type or
    /// `opener` is not one of `{[(<`.
    pub fn open(
        letter: Option<char>,
        opener: char,
    ) -> Option<Self> {
        let closer = closing_bracket(opener)?;
        let allows_interpolation = match letter {
            None | Some('Q' | 'W' | 'I' | 'r' | 'x') => true,
            Some('q' | 'w' | 'i' | 's') => false,
            Some(_) => return None,
        };
        Some(Self {
            opener,
            closer,
            nest_depth: 1,
            allows_interpolation,
            is_regex: letter == Some('r'),
        })
    }
}

/// Matching closer for a bracket opener
pub fn closing_bracket(opener: char) -> Option<char> {
    match opener {
        '{' => Some('}'),
        '[' => Some(']'),
        '(' => Some(')'),
        '<' => Some('>'),
        _ => None,
    }
}

/// Regex option letters accepted after a closing delimiter
pub fn is_regex_option(c: char) -> bool {
    matches!(c, 'i' | 'm' | 'x' | 'o' | 'u' | 'e' | 's' | 'n')
}

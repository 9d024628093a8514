//! Tokenizer implementation
//! Main lexer structure, the state stack driver and the code-context rules

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::literals::{
    is_horizontal_space, is_identifier_char, is_line_directive, scan_heredoc_opener,
    scan_number, scan_percent_opener, scan_sigil_variable, scan_word,
};
use super::literals;
use super::state::{LexerState, PendingHeredoc};
use super::tokens::{Token, TokenKind};

/// Main lexer structure
///
/// Created per call; the stack, heredoc queue and token buffer are all local
/// to one tokenization.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    stack: SmallVec<[LexerState; 8]>,
    pending_heredocs: VecDeque<PendingHeredoc>,
    tokens: Vec<Token<'src>>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source
    pub fn new(source: &'src str) -> Self {
        let mut stack = SmallVec::new();
        stack.push(LexerState::Code);
        Self {
            source,
            pos: 0,
            stack,
            pending_heredocs: VecDeque::new(),
            tokens: Vec::new(),
        }
    }

    /// Run to the end of input and return every token
    pub fn tokenize(mut self) -> Vec<Token<'src>> {
        while self.pos < self.source.len() {
            self.step();
        }
        self.tokens
    }

    /// Current nesting depth of the state stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Unconsumed input
    #[inline]
    pub(super) fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    /// Whether the scan position is at the start of a physical line
    #[inline]
    pub(super) fn at_line_start(&self) -> bool {
        self.pos == 0 || self.source.as_bytes()[self.pos - 1] == b'\n'
    }

    /// Emit the next `len` bytes as one token
    pub(super) fn emit(
        &mut self,
        kind: TokenKind,
        len: usize,
    ) {
        let end = (self.pos + len).min(self.source.len());
        self.tokens.push(Token::new(kind, &self.source[self.pos..end]));
        self.pos = end;
    }

    pub(super) fn push_state(
        &mut self,
        state: LexerState,
    ) {
        self.stack.push(state);
    }

    /// Pop the top frame. The bottom `Code` frame is never popped.
    pub(super) fn pop_state(&mut self) {
        debug_assert!(self.stack.len() > 1, "attempted to pop the bottom Code frame");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub(super) fn top_mut(&mut self) -> Option<&mut LexerState> {
        self.stack.last_mut()
    }

    /// After a newline, begin the body of the oldest heredoc opened on the
    /// line just finished
    pub(super) fn start_pending_heredoc(&mut self) {
        if let Some(pending) = self.pending_heredocs.pop_front() {
            self.push_state(LexerState::Heredoc(pending.into()));
        }
    }

    /// `#{` → InterpolationBegin, then lex code until the matching `}`
    pub(super) fn open_interpolation(&mut self) {
        self.emit(TokenKind::InterpolationBegin, 2);
        self.push_state(LexerState::Interpolation { depth: 1 });
    }

    /// `\` plus one character, verbatim. A dangling `\` at end of input is
    /// emitted alone.
    pub(super) fn lex_escape(&mut self) {
        let len = 1 + self.rest()[1..].chars().next().map_or(0, char::len_utf8);
        self.emit(TokenKind::StringPart, len);
    }

    fn open_literal(
        &mut self,
        opener_len: usize,
        state: LexerState,
    ) {
        self.emit(TokenKind::Other, opener_len);
        self.push_state(state);
    }

    /// Advance by one unit of work. Every call either consumes input or
    /// pushes a frame whose handler consumes input on the next call.
    fn step(&mut self) {
        match self.stack.last() {
            Some(LexerState::Code | LexerState::Interpolation { .. }) | None => self.lex_code(),
            Some(LexerState::DoubleQuotedString) => literals::lex_quoted(self, '"', true, false),
            Some(LexerState::SingleQuotedString) => literals::lex_quoted(self, '\'', false, false),
            Some(LexerState::Backtick) => literals::lex_quoted(self, '`', true, false),
            Some(LexerState::Regex) => literals::lex_quoted(self, '/', true, true),
            Some(LexerState::LineComment) => literals::lex_line_comment(self),
            Some(LexerState::BlockComment) => literals::lex_block_comment(self),
            Some(LexerState::PercentLiteral(_)) => literals::lex_percent_literal(self),
            Some(LexerState::Heredoc(frame)) => {
                let frame = frame.clone();
                literals::lex_heredoc(self, &frame);
            }
        }
    }

    /// Code-context dispatch; the first matching rule wins
    fn lex_code(&mut self) {
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return;
        };

        if self.at_line_start() {
            if is_line_directive(rest, "=begin") {
                self.push_state(LexerState::BlockComment);
                return;
            }
            if self.stack.len() == 1 && is_end_marker(rest) {
                self.emit(TokenKind::Comment, rest.len());
                return;
            }
        }

        if c == '\n' {
            self.emit(TokenKind::Space, 1);
            self.start_pending_heredoc();
            return;
        }
        if is_horizontal_space(c) {
            let len = rest
                .find(|ch: char| !is_horizontal_space(ch))
                .unwrap_or(rest.len());
            self.emit(TokenKind::Space, len);
            return;
        }

        if c == '#' && !rest[1..].starts_with('{') {
            self.push_state(LexerState::LineComment);
            return;
        }

        if let Some((len, pending)) = scan_heredoc_opener(rest) {
            self.emit(TokenKind::Other, len);
            self.pending_heredocs.push_back(pending);
            return;
        }

        match c {
            '"' => return self.open_literal(1, LexerState::DoubleQuotedString),
            '\'' => return self.open_literal(1, LexerState::SingleQuotedString),
            '`' => return self.open_literal(1, LexerState::Backtick),
            ':' if rest[1..].starts_with('"') => {
                return self.open_literal(2, LexerState::DoubleQuotedString)
            }
            ':' if rest[1..].starts_with('\'') => {
                return self.open_literal(2, LexerState::SingleQuotedString)
            }
            _ => {}
        }

        if let Some((len, frame)) = scan_percent_opener(rest) {
            return self.open_literal(len, LexerState::PercentLiteral(frame));
        }

        if c == '/' && self.regex_possible() {
            return self.open_literal(1, LexerState::Regex);
        }

        if let Some(len) = scan_word(rest) {
            self.emit(TokenKind::Word, len);
            return;
        }

        self.lex_other(c);
    }

    /// Anything else: braces (which drive interpolation depth), numbers,
    /// sigil variables, or a single character.
    fn lex_other(
        &mut self,
        c: char,
    ) {
        if let Some(LexerState::Interpolation { depth }) = self.top_mut() {
            match c {
                '{' => {
                    *depth += 1;
                    self.emit(TokenKind::Other, 1);
                    return;
                }
                '}' if *depth == 1 => {
                    self.emit(TokenKind::InterpolationEnd, 1);
                    self.pop_state();
                    return;
                }
                '}' => {
                    *depth -= 1;
                    self.emit(TokenKind::Other, 1);
                    return;
                }
                _ => {}
            }
        }

        let rest = self.rest();
        let len = if c.is_ascii_digit() {
            scan_number(rest)
        } else if let Some(len) = scan_sigil_variable(rest) {
            len
        } else {
            c.len_utf8()
        };
        self.emit(TokenKind::Other, len);
    }

    /// Whether `/` opens a regex here, judged from the last non-space token.
    ///
    /// After a word (identifier or keyword) a regex is assumed; after an
    /// `Other` token a regex is assumed unless it ends like an operand.
    fn regex_possible(&self) -> bool {
        let Some(last) = self.tokens.iter().rev().find(|t| !t.is_space()) else {
            return true;
        };
        match last.kind {
            TokenKind::Word => true,
            TokenKind::Other => !last
                .text
                .chars()
                .next_back()
                .is_some_and(|c| is_identifier_char(c) || matches!(c, ')' | ']' | '}' | '>')),
            _ => true,
        }
    }
}

/// A line consisting solely of `__END__`
fn is_end_marker(rest: &str) -> bool {
    rest.strip_prefix("__END__")
        .is_some_and(|after| after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n"))
}

//! Literal scanning implementations
//! Character classes, opener recognition, and the literal-body states
//! (quoted strings, regexes, backticks, percent literals, heredocs, comments)

use unicode_ident::{is_xid_continue, is_xid_start};

use super::state::{closing_bracket, is_regex_option, LexerState, PendingHeredoc, PercentLiteralFrame};
use super::tokenizer::Lexer;
use super::tokens::TokenKind;

/// Check if character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || is_xid_start(c)
}

/// Check if character is valid identifier continuation
pub fn is_identifier_char(c: char) -> bool {
    c == '_' || is_xid_continue(c)
}

/// Whitespace other than the newline
pub fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0B' | '\x0C')
}

/// Byte length of the identifier at the start of `s` (0 if none)
pub fn scan_identifier(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if is_identifier_start(c) => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !is_identifier_char(c))
        .map_or(s.len(), |(i, _)| i)
}

/// A word: identifier with an optional trailing `?` or `!`.
///
/// The suffix is left alone when followed by `=`, so `a!=b` keeps its `!=`.
pub fn scan_word(s: &str) -> Option<usize> {
    let len = scan_identifier(s);
    if len == 0 {
        return None;
    }
    let after = &s[len..];
    if after.starts_with(['?', '!']) && !after[1..].starts_with('=') {
        Some(len + 1)
    } else {
        Some(len)
    }
}

/// Numeric literal: digits and letters/underscores (`1_000`, `0x1F`, `2r`),
/// with one optional `.digits` fraction.
pub fn scan_number(s: &str) -> usize {
    let run = |t: &str| {
        t.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(t.len())
    };
    let mut len = run(s);
    let after = &s[len..];
    if after.starts_with('.') && after[1..].starts_with(|c: char| c.is_ascii_digit()) {
        len += 1 + run(&after[1..]);
    }
    len
}

/// `@ivar`, `@@cvar`, `$global`, `$0`, `$!` as one unit
pub fn scan_sigil_variable(s: &str) -> Option<usize> {
    if let Some(after) = s.strip_prefix("@@") {
        let len = scan_identifier(after);
        return (len > 0).then_some(2 + len);
    }
    if let Some(after) = s.strip_prefix('@') {
        let len = scan_identifier(after);
        return (len > 0).then_some(1 + len);
    }
    let after = s.strip_prefix('$')?;
    let len = scan_identifier(after);
    if len > 0 {
        return Some(1 + len);
    }
    let next = after.chars().next()?;
    if next.is_ascii_digit() {
        let digits = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        return Some(1 + digits);
    }
    matches!(
        next,
        '!' | '@' | '&' | '`' | '\'' | '+' | '~' | '=' | '/' | '\\' | ',' | ';' | '.' | '<'
            | '>' | '*' | '$' | '?' | ':' | '"'
    )
    .then_some(2)
}

/// `=begin` / `=end` at the start of a line, followed by whitespace or EOL
pub fn is_line_directive(
    rest: &str,
    directive: &str,
) -> bool {
    rest.strip_prefix(directive)
        .is_some_and(|after| after.chars().next().map_or(true, char::is_whitespace))
}

/// `<<ID`, `<<-ID`, `<<~ID`, with the identifier optionally quoted.
///
/// Returns the opener length and the queued heredoc. Single quotes disable
/// interpolation in the body.
pub fn scan_heredoc_opener(rest: &str) -> Option<(usize, PendingHeredoc)> {
    let after = rest.strip_prefix("<<")?;
    let (flag_len, body) = match after.strip_prefix(|c: char| c == '-' || c == '~') {
        Some(stripped) => (1, stripped),
        None => (0, after),
    };
    let quote = body.chars().next()?;
    let (delimiter, delimiter_len, allows_interpolation) = match quote {
        '\'' | '"' | '`' => {
            let inner = &body[1..];
            let end = inner.find(|c: char| c == quote || c == '\n')?;
            if end == 0 || !inner[end..].starts_with(quote) {
                return None;
            }
            (&inner[..end], end + 2, quote != '\'')
        }
        _ => {
            let len = scan_identifier(body);
            if len == 0 {
                return None;
            }
            (&body[..len], len, true)
        }
    };
    Some((
        2 + flag_len + delimiter_len,
        PendingHeredoc {
            delimiter: delimiter.to_string(),
            allows_interpolation,
        },
    ))
}

/// `%` + optional type letter + bracket opener
pub fn scan_percent_opener(rest: &str) -> Option<(usize, PercentLiteralFrame)> {
    let mut chars = rest.strip_prefix('%')?.chars();
    let first = chars.next()?;
    if closing_bracket(first).is_some() {
        return PercentLiteralFrame::open(None, first).map(|frame| (2, frame));
    }
    if !first.is_ascii_alphabetic() {
        return None;
    }
    let opener = chars.next()?;
    PercentLiteralFrame::open(Some(first), opener).map(|frame| (3, frame))
}

/// Closing delimiter plus any regex option letters
fn closer_len(
    rest: &str,
    closer: char,
    is_regex: bool,
) -> usize {
    let base = closer.len_utf8();
    if !is_regex {
        return base;
    }
    base + rest[base..]
        .find(|c: char| !is_regex_option(c))
        .unwrap_or(rest.len() - base)
}

/// Body of `"..."`, `'...'`, `` `...` `` and `/.../`
pub fn lex_quoted(
    lexer: &mut Lexer<'_>,
    closer: char,
    interpolates: bool,
    is_regex: bool,
) {
    let rest = lexer.rest();
    if rest.starts_with('\\') {
        return lexer.lex_escape();
    }
    if interpolates && rest.starts_with("#{") {
        return lexer.open_interpolation();
    }
    if rest.starts_with(closer) {
        lexer.emit(TokenKind::Other, closer_len(rest, closer, is_regex));
        return lexer.pop_state();
    }

    let mut end = rest.len();
    for (i, c) in rest.char_indices() {
        if c == '\\' || c == closer || (interpolates && rest[i..].starts_with("#{")) {
            end = i;
            break;
        }
    }
    lexer.emit(TokenKind::StringPart, end);
}

/// Body of a bracket percent literal, counting nested bracket pairs
pub fn lex_percent_literal(lexer: &mut Lexer<'_>) {
    let Some(LexerState::PercentLiteral(frame)) = lexer.top_mut() else {
        return;
    };
    let PercentLiteralFrame {
        opener,
        closer,
        mut nest_depth,
        allows_interpolation,
        is_regex,
    } = *frame;

    let rest = lexer.rest();
    if rest.starts_with('\\') {
        return lexer.lex_escape();
    }
    if allows_interpolation && rest.starts_with("#{") {
        return lexer.open_interpolation();
    }
    if rest.starts_with(closer) && nest_depth == 1 {
        lexer.emit(TokenKind::Other, closer_len(rest, closer, is_regex));
        return lexer.pop_state();
    }

    let mut end = rest.len();
    for (i, c) in rest.char_indices() {
        if c == '\\' || (allows_interpolation && rest[i..].starts_with("#{")) {
            end = i;
            break;
        }
        if c == opener {
            nest_depth += 1;
        } else if c == closer {
            if nest_depth == 1 {
                end = i;
                break;
            }
            nest_depth -= 1;
        }
    }
    if let Some(LexerState::PercentLiteral(frame)) = lexer.top_mut() {
        frame.nest_depth = nest_depth;
    }
    lexer.emit(TokenKind::StringPart, end);
}

/// Heredoc body. The closer is only recognised as a whole line.
pub fn lex_heredoc(
    lexer: &mut Lexer<'_>,
    frame: &super::state::HeredocFrame,
) {
    let rest = lexer.rest();
    if lexer.at_line_start() {
        let line_end = rest.find('\n').unwrap_or(rest.len());
        if rest[..line_end].trim() == frame.delimiter {
            lexer.emit(TokenKind::Other, line_end);
            return lexer.pop_state();
        }
    }

    let interpolates = frame.allows_interpolation;
    if interpolates && rest.starts_with('\\') {
        return lexer.lex_escape();
    }
    if interpolates && rest.starts_with("#{") {
        return lexer.open_interpolation();
    }

    let mut end = rest.len();
    let mut ends_line = false;
    for (i, c) in rest.char_indices() {
        if c == '\n' {
            end = i + 1;
            ends_line = true;
            break;
        }
        if interpolates && (c == '\\' || rest[i..].starts_with("#{")) {
            end = i;
            break;
        }
    }
    lexer.emit(TokenKind::StringPart, end);
    // heredocs opened inside this body's interpolation start on the next line
    if ends_line {
        lexer.start_pending_heredoc();
    }
}

/// `#` to end of line; the newline is left for the enclosing code
pub fn lex_line_comment(lexer: &mut Lexer<'_>) {
    let rest = lexer.rest();
    let end = rest.find('\n').unwrap_or(rest.len());
    lexer.emit(TokenKind::Comment, end);
    lexer.pop_state();
}

/// One line of an `=begin` ... `=end` block, terminator included
pub fn lex_block_comment(lexer: &mut Lexer<'_>) {
    let rest = lexer.rest();
    let end = rest.find('\n').map_or(rest.len(), |i| i + 1);
    let closes = is_line_directive(rest, "=end");
    lexer.emit(TokenKind::Comment, end);
    if closes {
        lexer.pop_state();
    }
}

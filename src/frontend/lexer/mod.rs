//! Lexer module
//!
//! A lossless, stack-based tokenizer for the Ruby-like surface syntax.
//! Concatenating the text of every emitted token reproduces the input
//! exactly, and tokenization never fails: unrecognised input becomes
//! one-character `Other` tokens, unterminated literals simply run to the
//! end of input.
//!
//! Split into specialized modules:
//! - `tokens`: token types
//! - `state`: state-stack frames and the heredoc queue entries
//! - `tokenizer`: the driver and code-context rules
//! - `literals`: character classes and literal-body states

pub mod literals;
pub mod state;
pub mod tokenizer;
pub mod tokens;

// Re-export types
pub use state::{LexerState, PendingHeredoc, PercentLiteralFrame};
pub use tokenizer::Lexer;
pub use tokens::{join_tokens, Token, TokenKind};

use crate::tlog;
use crate::util::i18n::MSG;

/// Tokenize source text
///
/// Returns an empty vector for empty input.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    tlog!(debug, MSG::LexStart, &source.len());

    let tokens = Lexer::new(source).tokenize();
    for token in &tokens {
        tracing::trace!(kind = %token.kind, text = ?token.text, "token");
    }

    tlog!(debug, MSG::LexComplete, &tokens.len());
    tokens
}

#[cfg(test)]
mod tests;

//! Frontend pipeline
//!
//! Lexer → keyword rewriting → (host evaluation) → diagnostic localization.
//! All of it is pure, synchronous text processing; the only shared input is
//! the read-only `KeywordTable`.

pub mod keywords;
pub mod lexer;
pub mod localizer;
pub mod transpiler;

pub use keywords::{KeywordTable, DEFAULT_KEYWORDS};
pub use localizer::{localize, DiagnosticLocalizer};
pub use transpiler::{rewrite, Transpiled, Transpiler, TYPE_NAME_PREFIX};

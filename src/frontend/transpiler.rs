//! Keyword rewriting
//!
//! Re-emits a token stream with localized keywords replaced by their
//! canonical spelling. Only `Word` tokens are ever touched, and newlines
//! pass through as-is, so the output has the same line structure as the
//! input and host diagnostics keep pointing at the right lines.

use indexmap::IndexSet;

use super::keywords::KeywordTable;
use super::lexer::{tokenize, Token, TokenKind};
use crate::tlog;
use crate::util::i18n::MSG;

/// Marker prepended to declared type names so they read as Ruby constants
pub const TYPE_NAME_PREFIX: char = 'C';

/// Result of transpiling one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpiled {
    /// Target-language code
    pub code: String,
    /// Type names that received the prefix, in declaration order
    pub type_names: Vec<String>,
}

/// Transpiler bound to one keyword table
#[derive(Debug, Clone, Copy)]
pub struct Transpiler<'t> {
    table: &'t KeywordTable,
}

impl<'t> Transpiler<'t> {
    pub fn new(table: &'t KeywordTable) -> Self {
        Self { table }
    }

    /// Transpile source text, keeping the collected type names for
    /// diagnostic localization
    pub fn transpile(
        &self,
        source: &str,
    ) -> Transpiled {
        let tokens = tokenize(source);
        let type_names = collect_type_names(&tokens, self.table.type_declaration_keywords());
        tlog!(debug, MSG::TypeNamesCollected, &type_names.len());

        let code = emit(&tokens, self.table, &type_names);
        Transpiled {
            code,
            type_names: type_names.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Rewrite `source` with `table`, treating `type_decl_keywords` as the
/// localized spellings that declare a type
pub fn rewrite(
    source: &str,
    table: &KeywordTable,
    type_decl_keywords: &IndexSet<String>,
) -> String {
    let tokens = tokenize(source);
    let type_names = collect_type_names(&tokens, type_decl_keywords);
    emit(&tokens, table, &type_names)
}

/// Names declared after a type-declaration keyword.
///
/// The next word after the keyword (spaces skipped) is recorded unless it
/// already starts with an ASCII letter. No scope tracking: a name declared
/// anywhere is prefixed everywhere in the same source.
pub fn collect_type_names<'src>(
    tokens: &[Token<'src>],
    type_decl_keywords: &IndexSet<String>,
) -> IndexSet<&'src str> {
    let mut names = IndexSet::new();
    for (i, token) in tokens.iter().enumerate() {
        if !token.is_word() || !type_decl_keywords.contains(token.text) {
            continue;
        }
        let next = tokens[i + 1..].iter().find(|t| !t.is_space());
        if let Some(name) = next.filter(|t| t.is_word()) {
            if !name.text.starts_with(|c: char| c.is_ascii_alphabetic()) {
                names.insert(name.text);
            }
        }
    }
    names
}

fn emit(
    tokens: &[Token<'_>],
    table: &KeywordTable,
    type_names: &IndexSet<&str>,
) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len() + 1).sum());
    for token in tokens {
        if token.kind != TokenKind::Word {
            out.push_str(token.text);
        } else if type_names.contains(token.text) {
            out.push(TYPE_NAME_PREFIX);
            out.push_str(token.text);
        } else if let Some(canonical) = table.canonical(token.text) {
            out.push_str(canonical);
        } else {
            out.push_str(token.text);
        }
    }
    out
}

//! Diagnostic localization
//!
//! Maps a host evaluator's diagnostic back to the author's spelling. The
//! message is free text, so this works on text rather than tokens, in three
//! passes:
//!
//! 1. strip the type-name prefix from every `C` + declared name,
//! 2. on source gutter lines (`  12 | code`, `> 12 | code`) replace canonical
//!    keywords in the code part, longest keyword first,
//! 3. replace a backtick-quoted span that is exactly a canonical keyword.
//!
//! Anything unrecognised is left as it is.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::keywords::KeywordTable;
use super::transpiler::TYPE_NAME_PREFIX;
use crate::tlog;
use crate::util::i18n::MSG;

/// Optional `>` cursor, line number, `|`, then the code text
static GUTTER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*>?[ \t]*\d+[ \t]*\|)(.*)$").expect("valid gutter pattern"));

static BACKTICK_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid backtick pattern"));

/// Localizer bound to one keyword table, with its keyword pattern compiled
#[derive(Debug, Clone)]
pub struct DiagnosticLocalizer<'t> {
    table: &'t KeywordTable,
    keyword_pattern: Option<Regex>,
}

impl<'t> DiagnosticLocalizer<'t> {
    pub fn new(table: &'t KeywordTable) -> Self {
        let keyword_pattern = match build_keyword_pattern(table) {
            Ok(pattern) => pattern,
            Err(e) => {
                tlog!(warn, MSG::LocalizerPatternFailed, &e);
                None
            }
        };
        Self {
            table,
            keyword_pattern,
        }
    }

    /// Localize one diagnostic message
    pub fn localize<S: AsRef<str>>(
        &self,
        message: &str,
        type_names: &[S],
    ) -> String {
        tlog!(debug, MSG::LocalizeStart, &type_names.len());

        let mut result = message.to_string();
        for name in type_names {
            result = strip_type_prefix(&result, name.as_ref()).into_owned();
        }

        if let Some(pattern) = &self.keyword_pattern {
            result = GUTTER_LINE
                .replace_all(&result, |caps: &Captures<'_>| {
                    let code = pattern.replace_all(&caps[2], |kw: &Captures<'_>| {
                        self.table.localized(&kw[0]).unwrap_or(&kw[0]).to_string()
                    });
                    format!("{}{}", &caps[1], code)
                })
                .into_owned();
        }

        BACKTICK_SPAN
            .replace_all(&result, |caps: &Captures<'_>| {
                let inner = &caps[1];
                format!("`{}`", self.table.localized(inner).unwrap_or(inner))
            })
            .into_owned()
    }
}

/// Localize `message` with `table`, un-prefixing `type_names`
pub fn localize<S: AsRef<str>>(
    message: &str,
    table: &KeywordTable,
    type_names: &[S],
) -> String {
    DiagnosticLocalizer::new(table).localize(message, type_names)
}

/// One alternation of every canonical keyword, longest first, each bounded
/// as a whole word. `None` for an empty table.
fn build_keyword_pattern(table: &KeywordTable) -> Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = table
        .canonicals_longest_first()
        .into_iter()
        .filter(|kw| !kw.is_empty())
        .map(|kw| format!(r"\b{}{}", regex::escape(kw), word_end(kw)))
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("(?:{})", alternatives.join("|"))).map(Some)
}

/// Trailing boundary: `\b` after a word character, `\B` after `?`/`!` so
/// that `defined?` still must not run into a following word.
fn word_end(keyword: &str) -> &'static str {
    match keyword.chars().next_back() {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => r"\B",
    }
}

fn strip_type_prefix<'m>(
    message: &'m str,
    name: &str,
) -> Cow<'m, str> {
    if name.is_empty() {
        return Cow::Borrowed(message);
    }
    let pattern = format!(
        r"\b{}({}){}",
        regex::escape(&TYPE_NAME_PREFIX.to_string()),
        regex::escape(name),
        word_end(name)
    );
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(message, "$1"),
        Err(_) => Cow::Borrowed(message),
    }
}

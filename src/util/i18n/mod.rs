//! Internationalization support for jp-ruby
//!
//! Message catalogues live in `locales/*.json` and are embedded at build
//! time, so the binary does not depend on the working directory.
//!
//! # Language selection
//!
//! Priority (high → low):
//! 1. Environment variable (`JP_RUBY_LANG`)
//! 2. Default language (`ja`)
//! 3. Fallback language (`en`)
//!
//! # Usage
//!
//! ```rust
//! use jp_ruby::util::i18n::{t_simple, MSG};
//!
//! println!("{}", t_simple(MSG::SyntaxErrorHeader, "en"));
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Environment variable selecting the message language
pub const LANG_ENV: &str = "JP_RUBY_LANG";

/// Language used when nothing is configured
pub const DEFAULT_LANG: &str = "ja";

/// Language used when a key or catalogue is missing
pub const FALLBACK_LANG: &str = "en";

/// Translation table loaded from JSON
type TranslationMap = HashMap<String, String>;

/// Embedded catalogues
const EMBEDDED_LANGS: &[(&str, &str)] = &[
    ("en", include_str!("../../../locales/en.json")),
    ("ja", include_str!("../../../locales/ja.json")),
];

static TRANSLATIONS: Lazy<HashMap<&'static str, TranslationMap>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(lang, content) in EMBEDDED_LANGS {
        match serde_json::from_str::<TranslationMap>(content) {
            Ok(translations) => {
                map.insert(lang, translations);
            }
            Err(e) => {
                eprintln!("Warning: Failed to parse {} translation file: {}", lang, e);
            }
        }
    }
    map
});

/// Get all available language codes
pub fn available_langs() -> Vec<&'static str> {
    let mut langs: Vec<_> = TRANSLATIONS.keys().copied().collect();
    langs.sort_unstable();
    langs
}

/// Get translation for a message ID
///
/// Placeholders `{0}`, `{1}`, ... are replaced by `args` in order. Unknown
/// languages fall back to English; unknown keys render as the key itself.
pub fn t(
    id: MSG,
    lang: &str,
    args: Option<&[&dyn std::fmt::Display]>,
) -> String {
    let key = id.key();
    let template = TRANSLATIONS
        .get(lang)
        .and_then(|m| m.get(key))
        .or_else(|| TRANSLATIONS.get(FALLBACK_LANG).and_then(|m| m.get(key)))
        .cloned()
        .unwrap_or_else(|| key.to_string());

    match args {
        Some(args) => {
            let mut result = template;
            for (i, arg) in args.iter().enumerate() {
                result = result.replace(&format!("{{{}}}", i), &arg.to_string());
            }
            result
        }
        None => template,
    }
}

/// Convenience function for translation without args
#[inline]
pub fn t_simple(
    id: MSG,
    lang: &str,
) -> String {
    t(id, lang, None)
}

/// Translate using the current language
#[inline]
pub fn t_cur(
    id: MSG,
    args: Option<&[&dyn std::fmt::Display]>,
) -> String {
    t(id, current_lang(), args)
}

/// Translate using the current language, without args
#[inline]
pub fn t_cur_simple(id: MSG) -> String {
    t_cur(id, None)
}

/// Translated logging through `tracing`
#[macro_export]
macro_rules! tlog {
    ($level:ident, $id:expr) => {
        ::tracing::$level!("{}", $crate::util::i18n::t_cur_simple($id))
    };
    ($level:ident, $id:expr, $($arg:expr),+ $(,)?) => {
        ::tracing::$level!("{}", $crate::util::i18n::t_cur($id, Some(&[$($arg as &dyn ::std::fmt::Display),+])))
    };
}

/// Current message language
pub fn current_lang() -> &'static str {
    if let Ok(env_lang) = std::env::var(LANG_ENV) {
        if let Some((&lang, _)) = TRANSLATIONS.get_key_value(env_lang.as_str()) {
            return lang;
        }
    }
    if TRANSLATIONS.contains_key(DEFAULT_LANG) {
        DEFAULT_LANG
    } else {
        FALLBACK_LANG
    }
}

/// Message IDs for logs and user-facing output
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MSG {
    // Lexer
    LexStart,
    LexComplete,

    // Transpiler
    TranspileStart,
    TypeNamesCollected,
    TranspileComplete,

    // Localizer
    LocalizeStart,
    LocalizerPatternFailed,

    // Config
    ConfigDiscovered,
    ConfigDefault,
    ConfigLoaded,

    // Host evaluator
    HostSpawn,
    HostExit,

    // CLI
    TranspileWrote,
    TranspileBatch,
    SyntaxErrorHeader,
    RunErrorHeader,
    ConfigErrorHeader,
    ErrorHeader,
}

impl MSG {
    /// Catalogue key
    pub fn key(&self) -> &'static str {
        match self {
            MSG::LexStart => "lex_start",
            MSG::LexComplete => "lex_complete",
            MSG::TranspileStart => "transpile_start",
            MSG::TypeNamesCollected => "type_names_collected",
            MSG::TranspileComplete => "transpile_complete",
            MSG::LocalizeStart => "localize_start",
            MSG::LocalizerPatternFailed => "localizer_pattern_failed",
            MSG::ConfigDiscovered => "config_discovered",
            MSG::ConfigDefault => "config_default",
            MSG::ConfigLoaded => "config_loaded",
            MSG::HostSpawn => "host_spawn",
            MSG::HostExit => "host_exit",
            MSG::TranspileWrote => "transpile_wrote",
            MSG::TranspileBatch => "transpile_batch",
            MSG::SyntaxErrorHeader => "syntax_error_header",
            MSG::RunErrorHeader => "run_error_header",
            MSG::ConfigErrorHeader => "config_error_header",
            MSG::ErrorHeader => "error_header",
        }
    }
}

#[cfg(test)]
mod tests;

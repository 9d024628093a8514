//! Keyword table
//!
//! Bidirectional mapping between localized keyword spellings and canonical
//! Ruby keywords, plus the localized spellings that declare a type
//! (`class`/`module` equivalents). Built once per run and read-only after
//! that, so one table can be shared across threads.

use indexmap::{IndexMap, IndexSet};

/// Canonical keywords whose localized spelling introduces a type name
pub const TYPE_DECLARATION_CANONICALS: &[&str] = &["class", "module"];

/// Built-in localized → canonical keyword pairs
pub const DEFAULT_KEYWORDS: &[(&str, &str)] = &[
    // Definitions and structure
    ("クラス", "class"),
    ("モジュール", "module"),
    ("定義", "def"),
    ("終わり", "end"),
    ("初期化", "initialize"),
    ("新規", "new"),
    // Conditionals
    ("もし", "if"),
    ("そうでなければ", "elsif"),
    ("でなければ", "else"),
    ("でない限り", "unless"),
    ("場合", "case"),
    ("条件", "when"),
    ("そして", "then"),
    // Loops and blocks
    ("繰り返す", "while"),
    ("まで", "until"),
    ("繰り返し", "for"),
    ("中の", "in"),
    ("する", "do"),
    // Literals
    ("真", "true"),
    ("偽", "false"),
    ("無", "nil"),
    // References
    ("自分", "self"),
    ("親", "super"),
    // Flow control
    ("戻す", "return"),
    ("次へ", "next"),
    ("中断", "break"),
    ("譲る", "yield"),
    ("やり直す", "redo"),
    ("再試行", "retry"),
    // Exceptions
    ("始まり", "begin"),
    ("救済", "rescue"),
    ("確保", "ensure"),
    ("発生", "raise"),
    // Modules and access control
    ("取り込む", "include"),
    ("拡張", "extend"),
    ("公開", "public"),
    ("非公開", "private"),
    ("保護", "protected"),
    ("別名", "alias"),
    ("未定義", "undef"),
    // Logical operators
    ("かつ", "and"),
    ("または", "or"),
    ("ではない", "not"),
    // Loading
    ("必要", "require"),
    ("相対必要", "require_relative"),
    // Output
    ("表示", "puts"),
    ("出力", "print"),
    ("検査", "p"),
    // Attributes
    ("属性", "attr_accessor"),
    ("読み属性", "attr_reader"),
    ("書き属性", "attr_writer"),
    // Introspection
    ("定義済み?", "defined?"),
    ("ブロック渡し?", "block_given?"),
    // Pseudo-variables
    ("__ファイル__", "__FILE__"),
    ("__行番号__", "__LINE__"),
    ("__エンコード__", "__ENCODING__"),
    // Block parameter and core classes
    ("それ", "it"),
    ("ラクター", "Ractor"),
    ("データ", "Data"),
];

/// Immutable localized ↔ canonical keyword mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    forward: IndexMap<String, String>,
    reverse: IndexMap<String, String>,
    type_declarations: IndexSet<String>,
}

impl KeywordTable {
    /// Build a table from localized → canonical pairs.
    ///
    /// Pairs are expected to be unique on both sides; conflict detection is
    /// the caller's job (see `util::config`).
    pub fn new<I, L, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<String>,
        C: Into<String>,
    {
        let forward: IndexMap<String, String> = pairs
            .into_iter()
            .map(|(localized, canonical)| (localized.into(), canonical.into()))
            .collect();
        let reverse = forward
            .iter()
            .map(|(localized, canonical)| (canonical.clone(), localized.clone()))
            .collect();
        let type_declarations = forward
            .iter()
            .filter(|(_, canonical)| TYPE_DECLARATION_CANONICALS.contains(&canonical.as_str()))
            .map(|(localized, _)| localized.clone())
            .collect();
        Self {
            forward,
            reverse,
            type_declarations,
        }
    }

    /// Canonical keyword for a localized spelling
    pub fn canonical(
        &self,
        localized: &str,
    ) -> Option<&str> {
        self.forward.get(localized).map(String::as_str)
    }

    /// Localized spelling for a canonical keyword
    pub fn localized(
        &self,
        canonical: &str,
    ) -> Option<&str> {
        self.reverse.get(canonical).map(String::as_str)
    }

    /// Localized spellings that introduce a type declaration
    pub fn type_declaration_keywords(&self) -> &IndexSet<String> {
        &self.type_declarations
    }

    /// Iterate localized → canonical pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(l, c)| (l.as_str(), c.as_str()))
    }

    /// Canonical keywords, longest first
    pub fn canonicals_longest_first(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.reverse.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        keys
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

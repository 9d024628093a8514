//! Runtime method aliases
//!
//! Localized method names (`配列.それぞれ`) are not keywords; they are real
//! Ruby method aliases installed before the user program runs. This module
//! holds the alias tables and renders them as a Ruby prelude that the host
//! loads with `-r`, so the user program's own line numbers are unaffected.

use std::fmt::Write as _;

use indexmap::IndexMap;

/// Built-in alias tables: class → [(localized alias, canonical method)]
pub const DEFAULT_ALIASES: &[(&str, &[(&str, &str)])] = &[
    (
        "Kernel",
        &[("表示", "puts"), ("出力", "print"), ("検査", "p"), ("取得", "gets")],
    ),
    (
        "Array",
        &[
            ("それぞれ", "each"),
            ("変換", "map"),
            ("選択", "select"),
            ("除外", "reject"),
            ("畳み込み", "reduce"),
            ("並べ替え", "sort"),
            ("逆順", "reverse"),
            ("平坦化", "flatten"),
            ("一意", "uniq"),
            ("含む?", "include?"),
            ("追加", "push"),
            ("長さ", "length"),
            ("大きさ", "size"),
            ("最初", "first"),
            ("最後", "last"),
            ("空?", "empty?"),
            ("結合", "join"),
            ("個数", "count"),
        ],
    ),
    (
        "Hash",
        &[
            ("それぞれ", "each"),
            ("鍵一覧", "keys"),
            ("値一覧", "values"),
            ("長さ", "length"),
            ("含む?", "include?"),
            ("空?", "empty?"),
            ("結合", "merge"),
            ("削除", "delete"),
        ],
    ),
    (
        "String",
        &[
            ("長さ", "length"),
            ("大きさ", "size"),
            ("分割", "split"),
            ("含む?", "include?"),
            ("置換", "gsub"),
            ("大文字", "upcase"),
            ("小文字", "downcase"),
            ("除去", "strip"),
            ("空?", "empty?"),
            ("逆順", "reverse"),
            ("文字列変換", "to_s"),
            ("整数変換", "to_i"),
            ("小数変換", "to_f"),
        ],
    ),
    (
        "Integer",
        &[
            ("回", "times"),
            ("偶数?", "even?"),
            ("奇数?", "odd?"),
            ("文字列変換", "to_s"),
            ("小数変換", "to_f"),
            ("まで上", "upto"),
            ("まで下", "downto"),
            ("絶対値", "abs"),
        ],
    ),
    (
        "Float",
        &[
            ("整数変換", "to_i"),
            ("文字列変換", "to_s"),
            ("切り上げ", "ceil"),
            ("切り捨て", "floor"),
            ("四捨五入", "round"),
            ("絶対値", "abs"),
        ],
    ),
    (
        "Object",
        &[
            ("凍結", "freeze"),
            ("凍結済み?", "frozen?"),
            ("複製", "dup"),
            ("は?", "is_a?"),
            ("応答する?", "respond_to?"),
        ],
    ),
];

/// Per-class alias tables: class → (localized alias → canonical method)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    classes: IndexMap<String, IndexMap<String, String>>,
}

impl AliasMap {
    /// Empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tables
    pub fn defaults() -> Self {
        let classes = DEFAULT_ALIASES
            .iter()
            .map(|&(class, aliases)| {
                let table = aliases
                    .iter()
                    .map(|&(alias, method)| (alias.to_string(), method.to_string()))
                    .collect();
                (class.to_string(), table)
            })
            .collect();
        Self { classes }
    }

    /// Install `alias` for `method` on `class`, replacing any previous alias
    /// of that method
    pub fn set_alias(
        &mut self,
        class: &str,
        method: &str,
        alias: &str,
    ) {
        let table = self.classes.entry(class.to_string()).or_default();
        table.retain(|_, existing| existing != method);
        table.insert(alias.to_string(), method.to_string());
    }

    /// Canonical method for an alias on a class
    pub fn method_for(
        &self,
        class: &str,
        alias: &str,
    ) -> Option<&str> {
        self.classes.get(class)?.get(alias).map(String::as_str)
    }

    /// Iterate classes with their alias tables
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.classes.iter().map(|(class, table)| (class.as_str(), table))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.values().all(IndexMap::is_empty)
    }

    /// Ruby source installing every alias, one `alias_method` per line.
    ///
    /// Each class block is guarded by `const_defined?`; an unknown class is
    /// skipped with a warning on stderr instead of aborting the load.
    pub fn render_prelude(&self) -> String {
        let mut out = String::from("# frozen_string_literal: true\n");
        for (class, table) in &self.classes {
            if table.is_empty() {
                continue;
            }
            let class = ruby_symbol(class);
            let _ = writeln!(out, "if Object.const_defined?({})", class);
            for (alias, method) in table {
                let _ = writeln!(
                    out,
                    "  Object.const_get({}).send(:alias_method, {}, {})",
                    class,
                    ruby_symbol(alias),
                    ruby_symbol(method)
                );
            }
            let _ = writeln!(out, "else");
            let _ = writeln!(
                out,
                "  warn(format({:?}, {}))",
                UNKNOWN_CLASS_WARNING, class
            );
            let _ = writeln!(out, "end");
        }
        out
    }
}

/// Printed by the prelude for a configured class the host does not define
const UNKNOWN_CLASS_WARNING: &str = "jp-ruby: unknown class %s, aliases skipped";

/// `:"..."` symbol literal with `"`, `\` and `#` escaped
fn ruby_symbol(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 3);
    out.push_str(":\"");
    for c in name.chars() {
        if matches!(c, '"' | '\\' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

//! jp-ruby: Ruby with Japanese keywords
//!
//! Source written with localized keywords (`クラス`, `定義`, `終わり`) is
//! rewritten token by token into plain Ruby, evaluated by a host `ruby`, and
//! any diagnostic the host reports is mapped back to the author's spelling.
//!
//! # Example
//!
//! ```
//! let out = jp_ruby::transpile("クラス 犬\n  定義 鳴く\n    表示 \"ワン\"\n  終わり\n終わり");
//! assert_eq!(out.code, "class C犬\n  def 鳴く\n    puts \"ワン\"\n  end\nend");
//! assert_eq!(out.type_names, vec!["犬".to_string()]);
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod backends;
pub mod frontend;
pub mod runtime;

// Utility modules
pub mod util;

use std::fs;
use std::path::{Path, PathBuf};

// Re-exports
pub use anyhow::{Context, Result};
pub use backends::{RubyExecutor, RunError, Runner};
pub use frontend::{KeywordTable, Transpiled, Transpiler};
pub use util::config::{Config, ConfigError};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::backends::ruby::DEFAULT_RUBY;
use crate::util::i18n::MSG;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name
pub const NAME: &str = "jp-ruby (日本語Ruby)";

/// Source file extension
pub const SOURCE_EXTENSION: &str = "jrb";

/// Transpile with the built-in keyword table
pub fn transpile(source: &str) -> Transpiled {
    let table = KeywordTable::default();
    Transpiler::new(&table).transpile(source)
}

/// Run a source file with the discovered (or explicit) config and the given
/// interpreter. Returns the host's localized stderr on success.
pub fn run_file(
    path: &Path,
    config: Option<&Path>,
    ruby: Option<&Path>,
    args: &[String],
) -> std::result::Result<String, RunError> {
    let config = Config::resolve(Some(path), config)?;
    let executor = RubyExecutor::new(ruby.unwrap_or(Path::new(DEFAULT_RUBY)));
    Runner::from_config(executor, &config)?.run_file(path, args)
}

/// A source file found for batch transpilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the directory it was found under, or the file name
    /// for a file given directly
    pub relative: PathBuf,
}

impl SourceFile {
    /// Output location under `out_dir`, with the `.rb` extension
    pub fn output_path(
        &self,
        out_dir: &Path,
    ) -> PathBuf {
        out_dir.join(&self.relative).with_extension("rb")
    }
}

/// Expand files and directories into source files. Directories are walked
/// recursively for `*.jrb`; files are taken as given.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for path in paths {
        if !path.is_dir() {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .with_context(|| format!("Not a source file: {}", path.display()))?;
            sources.push(SourceFile {
                path: path.clone(),
                relative,
            });
            continue;
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk directory: {}", path.display()))?;
            let is_source = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION);
            if !is_source {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(path)
                .unwrap_or(entry.path())
                .to_path_buf();
            sources.push(SourceFile {
                path: entry.into_path(),
                relative,
            });
        }
    }
    Ok(sources)
}

/// Transpile many files in parallel against one keyword table. Results are
/// in input order.
pub fn transpile_files(
    sources: &[SourceFile],
    table: &KeywordTable,
) -> Vec<Result<Transpiled>> {
    crate::tlog!(info, MSG::TranspileBatch, &sources.len());
    let transpiler = Transpiler::new(table);
    sources
        .par_iter()
        .map(|source| {
            let text = fs::read_to_string(&source.path)
                .with_context(|| format!("Failed to read file: {}", source.path.display()))?;
            Ok(transpiler.transpile(&text))
        })
        .collect()
}

/// Write one transpiled file, creating parent directories
pub fn write_output(
    source: &SourceFile,
    transpiled: &Transpiled,
    out_dir: &Path,
) -> Result<PathBuf> {
    let output = source.output_path(out_dir);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&output, &transpiled.code)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    crate::tlog!(info, MSG::TranspileWrote, &source.path.display(), &output.display());
    Ok(output)
}

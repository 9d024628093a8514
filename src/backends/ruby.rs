//! Ruby host evaluator
//!
//! Runs transpiled code with an external `ruby`. The alias prelude is loaded
//! with `-r`, and a small bootstrap evaluates the program under its original
//! filename starting at line 1, so every line number in a host diagnostic
//! refers to the author's source. Failures come back with their stderr
//! passed through the diagnostic localizer.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;
use thiserror::Error;

use super::{Executor, HostOutput, HostProgram};
use crate::frontend::{DiagnosticLocalizer, KeywordTable, Transpiler};
use crate::runtime::AliasMap;
use crate::tlog;
use crate::util::config::{Config, ConfigError};
use crate::util::i18n::MSG;

/// Interpreter used when none is given
pub const DEFAULT_RUBY: &str = "ruby";

/// First line the bootstrap writes before a syntax error message
const SYNTAX_ERROR_MARKER: &str = "jp-ruby:syntax-error\n";

/// Errors from running a program
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The host rejected the program; `message` is localized
    #[error("{message}")]
    Syntax { message: String },

    /// The program failed at run time; `message` is localized
    #[error("{message}")]
    HostFailed { status: i32, message: String },
}

impl RunError {
    /// Process exit code to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::HostFailed { status, .. } => *status,
            _ => 1,
        }
    }
}

/// `ruby -r PRELUDE -e BOOTSTRAP -- CODE_PATH FILENAME ARGS...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubyExecutor {
    ruby: PathBuf,
}

impl RubyExecutor {
    pub fn new(ruby: impl Into<PathBuf>) -> Self {
        Self { ruby: ruby.into() }
    }

    pub fn ruby(&self) -> &Path {
        &self.ruby
    }
}

impl Default for RubyExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_RUBY)
    }
}

impl Executor for RubyExecutor {
    fn execute(
        &self,
        program: &HostProgram,
    ) -> Result<HostOutput, RunError> {
        // Both files must outlive the child process
        let prelude = write_temp("jp-ruby-prelude-", &program.prelude)?;
        let code = write_temp("jp-ruby-code-", &program.code)?;

        tlog!(debug, MSG::HostSpawn, &self.ruby.display());
        let output = Command::new(&self.ruby)
            .arg("-r")
            .arg(prelude.path())
            .arg("-e")
            .arg(bootstrap())
            .arg("--")
            .arg(code.path())
            .arg(&program.filename)
            .args(&program.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| RunError::Spawn {
                program: self.ruby.display().to_string(),
                source,
            })?;

        let status = output.status.code();
        tlog!(debug, MSG::HostExit, &format!("{:?}", status));
        Ok(HostOutput {
            status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Evaluates `ARGV[0]`'s contents as file `ARGV[1]` from line 1, leaving
/// the remaining arguments in `ARGV` for the program
fn bootstrap() -> String {
    format!(
        concat!(
            "begin\n",
            "  eval(File.read(ARGV.shift, encoding: \"UTF-8\"), TOPLEVEL_BINDING, ($0 = ARGV.shift), 1)\n",
            "rescue SyntaxError => e\n",
            "  $stderr.print({:?}, e.message)\n",
            "  exit 1\n",
            "end\n",
        ),
        SYNTAX_ERROR_MARKER
    )
}

fn write_temp(
    prefix: &str,
    content: &str,
) -> Result<NamedTempFile, RunError> {
    let io_error = |source| RunError::Io {
        path: std::env::temp_dir(),
        source,
    };
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".rb")
        .tempfile()
        .map_err(io_error)?;
    file.write_all(content.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    Ok(file)
}

/// Transpile, evaluate, and localize failures
#[derive(Debug, Clone)]
pub struct Runner<E = RubyExecutor> {
    executor: E,
    table: KeywordTable,
    aliases: AliasMap,
}

impl<E: Executor> Runner<E> {
    pub fn new(
        executor: E,
        table: KeywordTable,
        aliases: AliasMap,
    ) -> Self {
        Self {
            executor,
            table,
            aliases,
        }
    }

    /// Build the keyword table and alias map from a loaded config
    pub fn from_config(
        executor: E,
        config: &Config,
    ) -> Result<Self, RunError> {
        let table = config.build_keyword_table()?;
        Ok(Self::new(executor, table, config.build_alias_map()))
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Run a source file. Returns the host's (localized) stderr on success.
    pub fn run_file(
        &self,
        path: &Path,
        args: &[String],
    ) -> Result<String, RunError> {
        let source = fs::read_to_string(path).map_err(|source| RunError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.run_source(&source, &path.display().to_string(), args)
    }

    /// Run source text reported as `filename`
    pub fn run_source(
        &self,
        source: &str,
        filename: &str,
        args: &[String],
    ) -> Result<String, RunError> {
        tlog!(info, MSG::TranspileStart, &filename);
        let transpiled = Transpiler::new(&self.table).transpile(source);
        tlog!(debug, MSG::TranspileComplete, &filename, &transpiled.code.len());

        let program = HostProgram {
            code: transpiled.code,
            prelude: self.aliases.render_prelude(),
            filename: filename.to_string(),
            args: args.to_vec(),
        };
        let output = self.executor.execute(&program)?;

        let localizer = DiagnosticLocalizer::new(&self.table);
        let names = transpiled.type_names.as_slice();
        if output.success() {
            return Ok(localizer.localize(&output.stderr, names));
        }
        if let Some(message) = output.stderr.strip_prefix(SYNTAX_ERROR_MARKER) {
            return Err(RunError::Syntax {
                message: localizer.localize(message, names),
            });
        }
        Err(RunError::HostFailed {
            status: output.status.unwrap_or(1),
            message: localizer.localize(&output.stderr, names),
        })
    }
}

//! Host evaluator backends
//!
//! Transpiled code is evaluated by an external host (a Ruby interpreter).
//! The `Executor` trait is the seam between the pipeline and that process,
//! so the runner can be driven by a stub in tests.
//!
//! # Architecture
//!
//! ```text
//! source (.jrb)
//!      |
//!  Transpiler ── type names ──┐
//!      |                      |
//!  HostProgram                |
//!      |                      v
//!  Executor ── stderr ──> DiagnosticLocalizer ──> RunError
//! ```

pub mod ruby;

pub use ruby::{RubyExecutor, RunError, Runner};

/// Everything the host needs to evaluate one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProgram {
    /// Transpiled target-language code
    pub code: String,
    /// Alias installer loaded before the program
    pub prelude: String,
    /// Name diagnostics should report (the original source path)
    pub filename: String,
    /// Arguments passed through to the program
    pub args: Vec<String>,
}

/// How the host process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOutput {
    /// Exit code; `None` when terminated by a signal
    pub status: Option<i32>,
    /// Captured diagnostic stream
    pub stderr: String,
}

impl HostOutput {
    #[inline]
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Executor trait - anything that can evaluate a `HostProgram`
pub trait Executor {
    fn execute(
        &self,
        program: &HostProgram,
    ) -> Result<HostOutput, RunError>;
}

//! Compiler backend abstraction for transpilation.
//!
//! Every saved snippet is TypeScript that must become a standalone ES module
//! the browser can `import`. The rest of livepad never calls SWC directly; it
//! goes through [`CompilerBackend`] and the [`compile`] entry point.
//!
//! Compilation is a pure function of `(module name, source)`. There is no
//! cache in here; caching belongs to the store.
//!
//! ## Failure reporting
//!
//! A failed compile carries every diagnostic the backend produced, ordered by
//! source position. Which of them reach the user is decided by a
//! [`DiagnosticPolicy`]; the default reports only the first one.
//!
//! ```ignore
//! use livepad_core::compiler::{compile, SwcBackend};
//!
//! let js = compile(&SwcBackend::new(), "main.ts", "const x: number = 1")?;
//! ```

pub mod spec;
pub mod swc;

pub use spec::{Diagnostic, TranspileOutput, TranspileSpec};
pub use swc::SwcBackend;

use std::fmt;

/// Which diagnostics of a failed compile are reported to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticPolicy {
    /// Only the earliest diagnostic. Keeps the edit loop terse.
    #[default]
    FirstOnly,
    /// Every diagnostic, one per line.
    All,
}

/// Source that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    /// Module the diagnostics refer to.
    pub module_name: String,
    /// Diagnostics in compiler order (earliest first). Never empty.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileFailure {
    /// Create a failure; an empty diagnostic list gets a generic entry.
    #[must_use]
    pub fn new(module_name: impl Into<String>, mut diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            diagnostics.push(Diagnostic::error("compilation failed"));
        }
        Self {
            module_name: module_name.into(),
            diagnostics,
        }
    }

    /// The earliest diagnostic.
    #[must_use]
    pub fn first(&self) -> &Diagnostic {
        &self.diagnostics[0]
    }

    /// Format the failure for the editor according to `policy`.
    #[must_use]
    pub fn message(&self, policy: DiagnosticPolicy) -> String {
        match policy {
            DiagnosticPolicy::FirstOnly => self.first().render(&self.module_name),
            DiagnosticPolicy::All => self
                .diagnostics
                .iter()
                .map(|d| d.render(&self.module_name))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(DiagnosticPolicy::FirstOnly))
    }
}

/// Error returned by a compiler backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The source is malformed or semantically invalid. User-facing.
    Failure(CompileFailure),
    /// The backend itself broke (codegen, encoding). Not the user's fault.
    Internal(String),
}

impl CompileError {
    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure(failure) => write!(f, "{failure}"),
            Self::Internal(message) => write!(f, "internal compiler error: {message}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<CompileFailure> for CompileError {
    fn from(failure: CompileFailure) -> Self {
        Self::Failure(failure)
    }
}

/// Compiler backend trait for transpilation.
///
/// The trait is `Send + Sync` so one backend can be shared by every request.
///
/// ## Implementations
///
/// - `SwcBackend` - TypeScript to ES module via SWC
pub trait CompilerBackend: Send + Sync {
    /// Get the backend name (e.g., "swc").
    fn name(&self) -> &'static str;

    /// Transpile one module according to the specification.
    ///
    /// # Errors
    ///
    /// Returns `CompileError::Failure` if the source has syntax errors and
    /// `CompileError::Internal` if the backend cannot emit output.
    fn transpile(&self, spec: &TranspileSpec, source: &str) -> Result<TranspileOutput, CompileError>;
}

/// Compile `source` (already import-rewritten) into browser module text.
pub fn compile(
    backend: &dyn CompilerBackend,
    module_name: &str,
    source: &str,
) -> Result<String, CompileError> {
    let spec = TranspileSpec::new(module_name);
    backend.transpile(&spec, source).map(|output| output.code)
}

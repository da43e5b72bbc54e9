//! Transpilation specification and diagnostic types.

use std::fmt::Write;

/// A compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error code (if available).
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Line number (1-indexed).
    pub line: Option<u32>,
    /// Column number (1-indexed, in UTF-16 code units).
    pub column: Option<u32>,
    /// Byte offset into the source, used for ordering only.
    pub(crate) offset: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            line: None,
            column: None,
            offset: 0,
        }
    }

    /// Set the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the source location.
    #[must_use]
    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set the byte offset used to order diagnostics.
    #[must_use]
    pub(crate) fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Render as `Error <code>: <message>[ in <module> at line L, character C]`.
    #[must_use]
    pub fn render(&self, module_name: &str) -> String {
        let mut out = match &self.code {
            Some(code) => format!("Error {code}: {}", self.message),
            None => format!("Error: {}", self.message),
        };
        if let (Some(line), Some(column)) = (self.line, self.column) {
            let _ = write!(out, " in {module_name} at line {line}, character {column}");
        }
        out
    }
}

/// Transpilation specification.
///
/// Output is always an unminified ES module at ESNext, so the module name is
/// the only input besides the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranspileSpec {
    /// Logical module name, used in diagnostics.
    pub module_name: String,
}

impl TranspileSpec {
    /// Create a spec for the given module.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }
}

/// Output from a successful transpilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOutput {
    /// Transpiled JavaScript code.
    pub code: String,
}

impl TranspileOutput {
    /// Create a new transpile output.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

//! SWC compiler backend implementation.
//!
//! Parses the snippet as a TypeScript *module* (strict mode, early errors on),
//! strips types, and prints ES module text. Nothing is bundled: imports are
//! left for the browser to fetch.
//!
//! Diagnostics are collected from both the recovered errors the parser keeps
//! going after and the fatal error that stops it, then ordered by source
//! position.

#![allow(clippy::default_trait_access)]

use super::spec::Diagnostic;
use super::{CompileError, CompileFailure, CompilerBackend, TranspileOutput, TranspileSpec};

use swc_common::{
    comments::SingleThreadedComments, sync::Lrc, FileName, Globals, Mark, SourceFile, SourceMap,
    Spanned, GLOBALS,
};
use swc_ecma_ast::{EsVersion, Module, ModuleItem, Program};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{error::SyntaxError, lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_transforms_base::{fixer::fixer, hygiene::hygiene, resolver};
use swc_ecma_transforms_typescript::strip;
use swc_ecma_visit::FoldWith;

/// SWC-based compiler backend.
///
/// `SwcBackend` is `Send + Sync`; every call builds its own source map and
/// globals, so concurrent compiles never share state.
#[derive(Debug, Clone, Default)]
pub struct SwcBackend {
    _private: (),
}

impl SwcBackend {
    /// Create a new SWC backend with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl CompilerBackend for SwcBackend {
    fn name(&self) -> &'static str {
        "swc"
    }

    fn transpile(
        &self,
        spec: &TranspileSpec,
        source: &str,
    ) -> Result<TranspileOutput, CompileError> {
        if source.is_empty() {
            return Ok(TranspileOutput::new(""));
        }
        compile_with_swc(spec, source)
    }
}

/// Stable code for a syntax error: the kind's variant name
/// (`TS1005`, `WithInStrict`, `Expected`, ...).
fn diagnostic_code(kind: &SyntaxError) -> String {
    format!("{kind:?}")
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// 1-based column of byte `offset`, counted in UTF-16 code units the way
/// editors and `tsc` report "character".
fn utf16_column(source: &str, offset: usize) -> Option<u32> {
    let before = source.get(..offset)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let units = before[line_start..].encode_utf16().count();
    u32::try_from(units + 1).ok()
}

fn to_diagnostic(
    err: &swc_ecma_parser::error::Error,
    cm: &SourceMap,
    fm: &SourceFile,
    source: &str,
) -> Diagnostic {
    let kind = err.kind();
    let mut diag = Diagnostic::error(kind.msg().into_owned()).with_code(diagnostic_code(kind));

    let span = err.span();
    if !span.is_dummy() && span.lo >= fm.start_pos && span.lo <= fm.end_pos {
        let loc = cm.lookup_char_pos(span.lo);
        let offset = span.lo.0.saturating_sub(fm.start_pos.0);
        let column = utf16_column(source, offset as usize).unwrap_or(loc.col.0 as u32 + 1);
        diag = diag
            .with_location(loc.line as u32, column)
            .with_offset(offset);
    }
    diag
}

fn compile_with_swc(spec: &TranspileSpec, source: &str) -> Result<TranspileOutput, CompileError> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        Lrc::new(FileName::Custom(spec.module_name.clone())),
        source.to_string(),
    );

    let syntax = Syntax::Typescript(TsSyntax {
        tsx: false,
        decorators: true,
        ..Default::default()
    });
    let target = EsVersion::EsNext;
    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(syntax, target, StringInput::from(&*fm), Some(&comments));
    let mut parser = Parser::new_from(lexer);

    // Module parsing implies strict mode.
    let parsed = parser.parse_module();

    let mut diagnostics: Vec<Diagnostic> = parser
        .take_errors()
        .iter()
        .map(|e| to_diagnostic(e, &cm, &fm, source))
        .collect();
    if let Err(fatal) = &parsed {
        diagnostics.push(to_diagnostic(fatal, &cm, &fm, source));
    }

    let module = match parsed {
        Ok(module) if diagnostics.is_empty() => module,
        _ => {
            // Stable sort: same-position diagnostics keep emission order.
            diagnostics.sort_by_key(|d| d.offset);
            // The parser can report one error twice at the same position.
            diagnostics.dedup();
            return Err(CompileFailure::new(spec.module_name.clone(), diagnostics).into());
        }
    };

    let output = GLOBALS.set(&Globals::default(), || {
        let unresolved_mark = Mark::new();
        let top_level_mark = Mark::new();

        let mut program = Program::Module(module);
        program = program.fold_with(&mut resolver(unresolved_mark, top_level_mark, true));
        program = program.fold_with(&mut strip(unresolved_mark, top_level_mark));

        let mut module = match program {
            Program::Module(m) => m,
            Program::Script(s) => Module {
                span: s.span,
                body: s.body.into_iter().map(ModuleItem::Stmt).collect(),
                shebang: s.shebang,
            },
        };

        module = module.fold_with(&mut hygiene());
        module = module.fold_with(&mut fixer(Some(&comments)));
        module
    });

    let mut buf = Vec::new();
    {
        let writer = JsWriter::new(cm.clone(), "\n", &mut buf, None);
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default().with_target(target),
            cm: cm.clone(),
            comments: Some(&comments),
            wr: writer,
        };
        emitter
            .emit_module(&output)
            .map_err(|e| CompileError::internal(format!("failed to emit: {e}")))?;
    }

    let code = String::from_utf8(buf)
        .map_err(|e| CompileError::internal(format!("invalid UTF-8 output: {e}")))?;
    Ok(TranspileOutput::new(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transpile(source: &str) -> Result<TranspileOutput, CompileError> {
        SwcBackend::new().transpile(&TranspileSpec::new("main.ts"), source)
    }

    fn failure(source: &str) -> CompileFailure {
        match transpile(source) {
            Err(CompileError::Failure(f)) => f,
            other => panic!("expected compile failure, got {other:?}"),
        }
    }

    #[test]
    fn test_swc_backend_name() {
        assert_eq!(SwcBackend::new().name(), "swc");
    }

    #[test]
    fn test_transpile_empty_source() {
        assert_eq!(transpile("").unwrap().code, "");
    }

    #[test]
    fn test_strips_types() {
        let source = r#"
            interface User {
                name: string;
                age: number;
            }
            const user: User = { name: "Alice", age: 30 };
            console.log(user.name as string);
        "#;

        let code = transpile(source).unwrap().code;
        assert!(!code.contains("interface"));
        assert!(!code.contains(": User"));
        assert!(!code.contains(" as string"));
        assert!(code.contains("const user"));
        assert!(code.contains("console.log"));
    }

    #[test]
    fn test_keeps_value_imports_unbundled() {
        let source = r#"
            import { Game } from "/sdk/0.3.173/sdk.js";
            import { helper } from "./ball";
            console.log(new Game(), helper());
        "#;

        let code = transpile(source).unwrap().code;
        assert!(code.contains("/sdk/0.3.173/sdk.js"));
        assert!(code.contains("./ball"));
    }

    #[test]
    fn test_type_only_imports_are_elided() {
        let source = r#"
            import { Ball } from "./ball";
            export const balls: Ball[] = [];
        "#;

        let code = transpile(source).unwrap().code;
        assert!(!code.contains("./ball"));
        assert!(code.contains("export const balls = []"));
    }

    #[test]
    fn test_fatal_parse_error_is_a_failure() {
        let f = failure("const x = {");
        let first = f.first();
        assert!(first.code.is_some());
        assert!(f.to_string().starts_with("Error "));
    }

    #[test]
    fn test_error_message_format() {
        let f = failure("let a = 1;\nlet b = ;\n");
        let message = f.to_string();
        assert!(message.starts_with("Error "), "{message}");
        assert!(message.contains(" in main.ts at line 2, character "), "{message}");
    }

    #[test]
    fn test_diagnostics_sorted_by_position() {
        // Two recoverable strict-mode errors, lines 1 and 3.
        let f = failure("with (a) {}\nconst ok = 1;\nwith (b) {}\n");
        assert!(f.diagnostics.len() >= 2, "{:?}", f.diagnostics);
        assert_eq!(f.first().line, Some(1));
        let lines: Vec<_> = f.diagnostics.iter().map(|d| d.line).collect();
        let mut sorted = lines.clone();
        sorted.sort();
        assert_eq!(lines, sorted);
        assert!(f.diagnostics.iter().any(|d| d.line == Some(3)));
    }

    #[test]
    fn test_earliest_code_comes_first() {
        let f = failure("x = 08;\nwith(a){}");
        let first = f.first();
        assert_eq!(first.code.as_deref(), Some("LegacyDecimal"));
        assert_eq!((first.line, first.column), (Some(1), Some(5)));

        let message = f.to_string();
        assert!(message.starts_with("Error LegacyDecimal: "), "{message}");
        assert!(!message.contains("TS2410"), "{message}");
        assert!(!message.contains("WithInStrict"), "{message}");
        assert!(f.diagnostics.iter().any(|d| d.line == Some(2)));
    }

    #[test]
    fn test_repeated_diagnostics_are_collapsed() {
        let f = failure("let = ;");
        for pair in f.diagnostics.windows(2) {
            assert_ne!(pair[0], pair[1], "{:?}", f.diagnostics);
        }
    }

    #[test]
    fn test_column_counts_utf16_units() {
        // The emoji is one scalar value but two UTF-16 code units.
        let ascii = failure("const s = \"x\"; let = ;");
        let emoji = failure("const s = \"\u{1F600}\"; let = ;");
        assert_eq!(ascii.first().code, emoji.first().code);
        assert_eq!(emoji.first().line, Some(1));
        let ascii_col = ascii.first().column.unwrap();
        assert_eq!(emoji.first().column, Some(ascii_col + 1));
    }

    #[test]
    fn test_utf16_column() {
        assert_eq!(utf16_column("abc", 0), Some(1));
        assert_eq!(utf16_column("a\nbc", 3), Some(2));
        assert_eq!(utf16_column("\u{1F600}x", 4), Some(3));
        assert_eq!(utf16_column("\u{e9}x", 2), Some(2));
        // Not a char boundary.
        assert_eq!(utf16_column("\u{1F600}", 1), None);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let source = "export function add(a: number, b: number): number { return a + b }";
        assert_eq!(transpile(source).unwrap(), transpile(source).unwrap());
    }

    #[test]
    fn test_diagnostic_code_is_variant_name() {
        assert_eq!(diagnostic_code(&SyntaxError::WithInStrict), "WithInStrict");
        assert_eq!(diagnostic_code(&SyntaxError::Eof), "Eof");
    }
}

//! Content synthesized for sessions that have not saved anything yet.
//!
//! Only two names have a default: the host page and the entry module. The
//! entry module default is TypeScript that goes through the same rewrite and
//! compile path as a real save, so a broken pipeline shows up immediately.

use crate::compiler::{compile, CompileError, CompilerBackend};
use crate::rewrite::ImportRewriter;
use std::sync::Arc;

/// Name of the host page artifact.
pub const PAGE_NAME: &str = "index.html";

/// Name of the entry module the host page loads.
pub const ENTRY_NAME: &str = "main.ts";

const DEFAULT_MAIN: &str = r##"import { Game, hex } from "@vaguevoid/sdk"
import { entrypoint } from "@vaguevoid/sdk/browser"
entrypoint(new Game({}, [
  {
    paint: (painter, { screen }) => {
      painter.rect({
        x: screen.center.x,
        y: screen.center.y,
        width: screen.width/2,
        height: screen.height/2,
        color: hex("#FF0000"),
      })
    }
  },
]))
console.log("no main.ts found, providing default implementation")
"##;

/// Render the host page for a session.
///
/// The page has no margin, padding or scrollbars and loads exactly one
/// module: the session's entry module.
#[must_use]
pub fn render_page(sid: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <style>
    body {{
      padding: 0;
      margin: 0;
      overflow: hidden;
    }}
  </style>
  <script type="module" src="/serve/{sid}/{ENTRY_NAME}"></script>
</head>
<body>
</body>
</html>
"#
    )
}

/// Provider of default content.
#[derive(Clone)]
pub struct DefaultContent {
    rewriter: ImportRewriter,
    compiler: Arc<dyn CompilerBackend>,
}

impl std::fmt::Debug for DefaultContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultContent")
            .field("rewriter", &self.rewriter)
            .field("compiler", &self.compiler.name())
            .finish()
    }
}

impl DefaultContent {
    /// Create a provider that compiles with the given rewriter and backend.
    #[must_use]
    pub fn new(rewriter: ImportRewriter, compiler: Arc<dyn CompilerBackend>) -> Self {
        Self { rewriter, compiler }
    }

    /// Default content for `name`, or `None` if the name has no default.
    ///
    /// Names are matched exactly: `main.ts` has a default, `main` does not.
    #[must_use]
    pub fn default_for(&self, sid: &str, name: &str) -> Option<Result<String, CompileError>> {
        match name {
            PAGE_NAME => Some(Ok(render_page(sid))),
            ENTRY_NAME => {
                let source = self.rewriter.rewrite(DEFAULT_MAIN);
                Some(compile(self.compiler.as_ref(), ENTRY_NAME, &source))
            }
            _ => None,
        }
    }
}

//! Save and serve operations for editing sessions.
//!
//! A session is an opaque, client-generated id. There is no registration and
//! no authentication: whoever holds the id can read and overwrite its modules.
//!
//! Per cache key the lifecycle is `Empty → Cached` (first successful save or
//! first default materialization) and `Cached → Cached` (every later successful
//! save). A failed save never changes the stored entry.
//!
//! Saves for the same key are not serialized against each other. When two
//! overlap, whichever finishes compiling last is what the store keeps.

use crate::compiler::{compile, CompileError, CompilerBackend, DiagnosticPolicy, SwcBackend};
use crate::defaults::{DefaultContent, PAGE_NAME};
use crate::error::Error;
use crate::resolver::ContentResolver;
use crate::rewrite::ImportRewriter;
use crate::store::{CacheKey, MemoryStore, ModuleStore};
use std::sync::Arc;
use tracing::{debug, info};

/// What a served artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// The host page.
    Page,
    /// A compiled ES module.
    Module,
}

impl ContentKind {
    /// HTTP content type for this kind.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Page => "text/html; charset=utf-8",
            Self::Module => "text/javascript; charset=utf-8",
        }
    }
}

/// A resolved artifact ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served {
    pub kind: ContentKind,
    pub body: String,
}

/// The compile-and-serve pipeline.
///
/// Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct Playground {
    store: Arc<dyn ModuleStore>,
    compiler: Arc<dyn CompilerBackend>,
    rewriter: ImportRewriter,
    resolver: ContentResolver,
    policy: DiagnosticPolicy,
}

// Manual Debug impl because the trait objects don't implement Debug
impl std::fmt::Debug for Playground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playground")
            .field("entries", &self.store.len())
            .field("compiler", &self.compiler.name())
            .field("rewriter", &self.rewriter)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Playground {
    /// Create a pipeline over the given store and compiler.
    #[must_use]
    pub fn new(store: Arc<dyn ModuleStore>, compiler: Arc<dyn CompilerBackend>) -> Self {
        let rewriter = ImportRewriter::default();
        let resolver = ContentResolver::new(
            store.clone(),
            DefaultContent::new(rewriter.clone(), compiler.clone()),
        );
        Self {
            store,
            compiler,
            rewriter,
            resolver,
            policy: DiagnosticPolicy::default(),
        }
    }

    /// Unbounded in-memory store with the SWC backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(SwcBackend::new()))
    }

    /// Replace the import rewrite table (also used for the default entry module).
    #[must_use]
    pub fn with_rewriter(mut self, rewriter: ImportRewriter) -> Self {
        self.resolver = ContentResolver::new(
            self.store.clone(),
            DefaultContent::new(rewriter.clone(), self.compiler.clone()),
        );
        self.rewriter = rewriter;
        self
    }

    /// Choose which diagnostics a failed save reports.
    #[must_use]
    pub fn with_policy(mut self, policy: DiagnosticPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ModuleStore> {
        &self.store
    }

    /// Text reported to the client for an error.
    #[must_use]
    pub fn describe(&self, err: &Error) -> String {
        match err {
            Error::Compile(failure) => failure.message(self.policy),
            Error::NotFound { .. } => "not found".to_string(),
            Error::Unexpected(_) => err.to_string(),
        }
    }

    /// Rewrite, compile and store `source` as `name` for session `sid`.
    ///
    /// On any error the store is left as it was.
    pub fn save(&self, sid: &str, name: &str, source: &str) -> Result<(), Error> {
        let key = CacheKey::new(sid, name);
        let rewritten = self.rewriter.rewrite(source);

        match compile(self.compiler.as_ref(), name, &rewritten) {
            Ok(code) => {
                info!(%key, bytes = code.len(), "saved module");
                self.store.set(key, code);
                Ok(())
            }
            Err(CompileError::Failure(failure)) => {
                debug!(%key, diagnostics = failure.diagnostics.len(), "compile failed");
                Err(Error::Compile(failure))
            }
            Err(CompileError::Internal(message)) => Err(Error::Unexpected(message)),
        }
    }

    /// Resolve what to send for `GET /serve/{sid}[/{name}]`.
    ///
    /// Without a name this is the host page. With a name it is served as a
    /// module whether or not the stored text is valid script.
    pub fn serve(&self, sid: &str, name: Option<&str>) -> Result<Served, Error> {
        let (kind, name) = match name {
            Some(name) => (ContentKind::Module, name),
            None => (ContentKind::Page, PAGE_NAME),
        };

        match self.resolver.resolve(sid, name) {
            Ok(Some(body)) => Ok(Served { kind, body }),
            Ok(None) => Err(Error::NotFound {
                key: CacheKey::new(sid, name),
            }),
            Err(err) => Err(Error::unexpected(format!("default {name} failed: {err}"))),
        }
    }
}

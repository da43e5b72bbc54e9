//! Content resolution: store first, then synthesized defaults.

use crate::compiler::CompileError;
use crate::defaults::DefaultContent;
use crate::store::{CacheKey, ModuleStore};
use std::sync::Arc;
use tracing::debug;

/// Resolves a session's module to its content.
#[derive(Clone)]
pub struct ContentResolver {
    store: Arc<dyn ModuleStore>,
    defaults: DefaultContent,
}

impl ContentResolver {
    /// Create a resolver over `store`, falling back to `defaults`.
    #[must_use]
    pub fn new(store: Arc<dyn ModuleStore>, defaults: DefaultContent) -> Self {
        Self { store, defaults }
    }

    /// Resolve `name` for session `sid`.
    ///
    /// 1. a stored entry is returned as is;
    /// 2. otherwise a default, if the name has one, is written to the store
    ///    and returned, so later requests see the same content;
    /// 3. otherwise `Ok(None)`.
    ///
    /// A default that fails to compile is returned as an error and nothing
    /// is stored.
    pub fn resolve(&self, sid: &str, name: &str) -> Result<Option<String>, CompileError> {
        let key = CacheKey::new(sid, name);
        if let Some(content) = self.store.get(&key) {
            debug!(%key, "store hit");
            return Ok(Some(content));
        }

        match self.defaults.default_for(sid, name) {
            Some(content) => {
                let content = content?;
                debug!(%key, bytes = content.len(), "materialized default");
                self.store.set(key, content.clone());
                Ok(Some(content))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompileFailure, CompilerBackend, SwcBackend, TranspileOutput, TranspileSpec};
    use crate::rewrite::ImportRewriter;
    use crate::store::MemoryStore;

    fn resolver_with(store: Arc<MemoryStore>, compiler: Arc<dyn CompilerBackend>) -> ContentResolver {
        ContentResolver::new(store, DefaultContent::new(ImportRewriter::default(), compiler))
    }

    #[test]
    fn test_store_hit_wins_over_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(CacheKey::new("s", "main.ts"), "saved".to_string());
        let resolver = resolver_with(store, Arc::new(SwcBackend::new()));

        assert_eq!(resolver.resolve("s", "main.ts").unwrap(), Some("saved".to_string()));
    }

    #[test]
    fn test_default_is_materialized_into_store() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store.clone(), Arc::new(SwcBackend::new()));

        let first = resolver.resolve("s", "index.html").unwrap().unwrap();
        assert_eq!(store.get(&CacheKey::new("s", "index")), Some(first.clone()));
        assert_eq!(resolver.resolve("s", "index.html").unwrap(), Some(first));
    }

    #[test]
    fn test_unknown_name_resolves_to_none() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store.clone(), Arc::new(SwcBackend::new()));

        assert_eq!(resolver.resolve("s", "ball.ts").unwrap(), None);
        assert!(store.is_empty());
    }

    struct Broken;

    impl CompilerBackend for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn transpile(&self, spec: &TranspileSpec, _: &str) -> Result<TranspileOutput, CompileError> {
            Err(CompileFailure::new(spec.module_name.clone(), Vec::new()).into())
        }
    }

    #[test]
    fn test_failed_default_is_not_stored() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store.clone(), Arc::new(Broken));

        assert!(resolver.resolve("s", "main.ts").is_err());
        assert!(store.is_empty());
    }
}

//! Session-scoped module store.
//!
//! Maps `(session, extensionless module name)` to compiled module text or a
//! rendered page. Entries are only ever replaced wholesale, never patched, so
//! the store needs nothing beyond per-key atomic `get` and `set`.

use dashmap::DashMap;
use std::fmt;
use std::path::Path;

/// Cache key: a session id plus the module name without its extension.
///
/// `main.ts`, `main.js` and `main` all address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    sid: String,
    name: String,
}

impl CacheKey {
    /// Derive the key for a module requested by a session.
    ///
    /// Any directory part and the last extension are dropped:
    /// `main.ts` → `main`, `a.b.ts` → `a.b`, `.hidden` stays `.hidden`.
    /// `.` and `..` have no stem and are kept as they are.
    #[must_use]
    pub fn new(sid: &str, module_name: &str) -> Self {
        let name = Path::new(module_name).file_stem().map_or_else(
            || {
                module_name
                    .rsplit('/')
                    .next()
                    .unwrap_or(module_name)
                    .to_string()
            },
            |stem| stem.to_string_lossy().into_owned(),
        );
        Self {
            sid: sid.to_string(),
            name,
        }
    }

    /// Session id.
    #[must_use]
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// Extensionless module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sid, self.name)
    }
}

/// Backing storage for compiled modules.
///
/// Handlers only see this trait, so a bounded, evicting or persistent store
/// can be swapped in without touching them.
pub trait ModuleStore: Send + Sync {
    /// Look up an entry.
    fn get(&self, key: &CacheKey) -> Option<String>;

    /// Insert or replace an entry.
    fn set(&self, key: CacheKey, entry: String);

    /// Number of entries held.
    fn len(&self) -> usize;

    /// Whether the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Unbounded in-memory store.
///
/// Entries live for the life of the process: there is no TTL, no size limit
/// and no eviction. Memory grows with every new session and module name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<CacheKey, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModuleStore for MemoryStore {
    fn get(&self, key: &CacheKey) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: CacheKey, entry: String) {
        self.entries.insert(key, entry);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

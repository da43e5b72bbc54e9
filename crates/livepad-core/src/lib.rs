#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]

//! Core of livepad.
//!
//! Turns raw TypeScript edits into browser-loadable ES modules and keeps them
//! in a session-scoped store:
//!
//! ```text
//! save:  source → rewrite imports → compile (SWC) → store.set(sid:name)
//! serve: store.get(sid:name) → or synthesized default (cached) → content
//! ```
//!
//! Library crates only emit `tracing` events; the CLI installs the subscriber.

pub mod compiler;
pub mod config;
pub mod defaults;
pub mod error;
pub mod resolver;
pub mod rewrite;
pub mod session;
pub mod store;
pub mod version;

pub use compiler::{compile, CompileError, CompileFailure, CompilerBackend, DiagnosticPolicy, SwcBackend};
pub use config::Config;
pub use defaults::DefaultContent;
pub use error::Error;
pub use resolver::ContentResolver;
pub use rewrite::{ImportRewriter, RewriteRule};
pub use session::{ContentKind, Playground, Served};
pub use store::{CacheKey, MemoryStore, ModuleStore};
pub use version::{SDK_VERSION, VERSION};

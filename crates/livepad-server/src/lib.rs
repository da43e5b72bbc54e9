#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

//! HTTP surface for livepad.
//!
//! ```text
//! GET  /ping                 → 200 "pong"
//! GET  /serve/{sid}          → 200 host page (text/html)
//! GET  /serve/{sid}/{name}   → 200 module (text/javascript) | 404 "not found"
//! POST /save/{sid}/{name}    → 200 "ok" | 400 diagnostic | 500
//! ```
//!
//! Compilation is CPU bound and runs on tokio's blocking pool, so one slow
//! compile never stalls the accept loop or other requests.

mod handlers;
mod server;

pub use handlers::router;
pub use server::{run_server, ServerConfig};

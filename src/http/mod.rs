//! HTTP server module.
//!
//! Binds the listener and serves the router, and provides the static file
//! service mounted under `/static`.

mod server;
pub mod static_files;

pub use server::{listen_addr, start_server, ServerError};

//! Verbatim - minimal concurrent HTTP/1.0 static-file server
//!
//! Core library for request handling, path resolution and response streaming.

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;

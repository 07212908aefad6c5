//! Filesystem side of request handling
//!
//! Maps request targets onto files below the document root.

pub mod resolver;

pub use resolver::{ResolveError, ResolvedPath, resolve_target};

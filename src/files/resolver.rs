//! Request target to filesystem path resolution
//!
//! Resolution is purely lexical: the target is split on `/`, `.` segments
//! are dropped and `..` segments pop the previous one. A `..` with nothing
//! left to pop would leave the document root and is rejected rather than
//! clamped. Symbolic links inside the root are followed when the file is
//! opened and are not checked here.

use std::fmt;
use std::path::{Path, PathBuf};

/// Reasons a target cannot be mapped below the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Not an origin-form path (`/...`) or contains bytes no file name may hold
    BadTarget,
    /// A `..` segment climbs above the document root
    PathTraversal,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::BadTarget => write!(f, "malformed request target"),
            ResolveError::PathTraversal => write!(f, "target escapes the document root"),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A target mapped onto the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute path, always inside the document root
    pub absolute_path: PathBuf,
    /// Whether a regular file currently lives there
    pub exists: bool,
}

impl ResolvedPath {
    /// Resolves `target` and checks whether it names a regular file.
    pub async fn probe(root: &Path, target: &str) -> Result<Self, ResolveError> {
        let absolute_path = resolve_target(root, target)?;
        let exists = tokio::fs::metadata(&absolute_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        Ok(Self {
            absolute_path,
            exists,
        })
    }
}

/// Joins a raw request target onto `root`, normalising `.` and `..`.
///
/// Any query string (`?...`) or fragment (`#...`) is discarded first. The
/// target `/` resolves to `root` itself.
pub fn resolve_target(root: &Path, target: &str) -> Result<PathBuf, ResolveError> {
    let path = strip_query(target);

    if !path.starts_with('/') {
        return Err(ResolveError::BadTarget);
    }

    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(ResolveError::PathTraversal);
                }
            }
            s if s.contains(['\\', '\0']) => return Err(ResolveError::BadTarget),
            s => segments.push(s),
        }
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(segments);

    // Component-wise prefix check, so "/root-other" never passes for "/root".
    if !resolved.starts_with(root) {
        return Err(ResolveError::PathTraversal);
    }

    Ok(resolved)
}

fn strip_query(target: &str) -> &str {
    match target.find(['?', '#']) {
        Some(idx) => &target[..idx],
        None => target,
    }
}

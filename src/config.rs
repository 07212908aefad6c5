use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;

/// Command line: `verbatim <port> <document-root>`.
#[derive(Debug, Clone, Parser)]
#[command(name = "verbatim")]
#[command(about = "Minimal concurrent HTTP/1.0 static-file server")]
pub struct Args {
    /// TCP port to listen on
    pub port: u16,

    /// Directory to serve files from
    pub document_root: PathBuf,
}

/// Process-wide server settings.
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// connection handler.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Canonical, absolute directory every request is resolved against
    pub document_root: PathBuf,
    /// TCP port the acceptor listens on
    pub listen_port: u16,
    /// Upper bound on waiting for request bytes. `None` waits forever.
    pub read_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Builds a config from a document root and port.
    ///
    /// The root is canonicalised, so it must exist and be a directory.
    pub fn new(document_root: impl Into<PathBuf>, listen_port: u16) -> anyhow::Result<Self> {
        let raw = document_root.into();
        let document_root = std::fs::canonicalize(&raw)
            .with_context(|| format!("document root {} is not accessible", raw.display()))?;

        if !document_root.is_dir() {
            bail!("document root {} is not a directory", document_root.display());
        }

        Ok(Self {
            document_root,
            listen_port,
            read_timeout: None,
        })
    }

    /// Builds the config from parsed command-line arguments.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        Self::new(args.document_root, args.port)
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Address to bind: every interface on the configured port.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }
}

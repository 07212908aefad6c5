use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::http::connection::Connection;

/// Pause after a failed accept before trying again.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Binds the listening socket for `cfg`.
pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr();
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

/// Accepts connections forever, one task per connection.
///
/// There is no cap on concurrent connections and no read or write timeout
/// unless `read_timeout` is configured, so a slow client holds its task for
/// as long as it likes. A failed accept is logged and the loop carries on
/// after `ACCEPT_BACKOFF`, so descriptor exhaustion cannot spin it.
pub async fn serve(listener: TcpListener, cfg: Arc<ServerConfig>) -> anyhow::Result<()> {
    info!(
        root = %cfg.document_root.display(),
        "Listening on {}",
        listener.local_addr()?
    );

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("accept error: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        debug!("Accepted connection from {}", peer);

        let cfg = Arc::clone(&cfg);
        tokio::spawn(async move {
            if let Err(e) = Connection::new(socket, peer, cfg).run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

pub async fn run(cfg: ServerConfig) -> anyhow::Result<()> {
    let listener = bind(&cfg).await?;
    serve(listener, Arc::new(cfg)).await
}

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::RequestHandler;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let handler = Arc::new(RequestHandler::from_config(cfg)?);
    let listener = TcpListener::bind(cfg.listen_addr()).await?;
    info!(
        "Listening on {} serving {}",
        cfg.listen_addr(),
        handler.resolver().root().display()
    );

    serve(listener, handler, cfg.max_workers).await
}

/// Accepts connections forever, handling at most `max_workers` at once.
///
/// A worker permit is taken before each accept, so a saturated pool stops
/// accepting and new clients wait in the listen backlog.
pub async fn serve(
    listener: TcpListener,
    handler: Arc<RequestHandler>,
    max_workers: usize,
) -> anyhow::Result<()> {
    let workers = Arc::new(Semaphore::new(max_workers));
    let accepted = AtomicU64::new(0);

    loop {
        let permit = workers.clone().acquire_owned().await?;

        let (socket, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };

        let id = accepted.fetch_add(1, Ordering::Relaxed) + 1;
        info!(id, "Accepted connection from {}", peer);

        let handler = handler.clone();
        let span = tracing::info_span!("connection", id, %peer);
        tokio::spawn(
            async move {
                let conn = Connection::new(socket, peer.to_string());
                if let Err(e) = handler.handle(conn).await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
                drop(permit);
            }
            .instrument(span),
        );
    }
}

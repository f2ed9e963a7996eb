// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Main server loop.
///
/// Runs until `shutdown` flips to `true`. The listener is then closed so no
/// new connections arrive, and the loop waits up to
/// `performance.shutdown_grace_period` seconds for active ones to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            shutdown.clone(),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            changed = shutdown.changed() => {
                // A dropped sender also means nobody can keep us running
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    drop(listener);
    logger::log_shutdown_requested(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.shutdown_grace_period);
    let remaining = wait_for_drain(&active_connections, grace).await;
    logger::log_shutdown_complete(remaining);

    Ok(())
}

/// Wait until the counter reaches zero or `grace` elapses; returns what is left
async fn wait_for_drain(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use crate::store::FileStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_wait_for_drain_returns_when_idle() {
        let counter = AtomicUsize::new(0);
        assert_eq!(wait_for_drain(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_wait_for_drain_gives_up_after_grace() {
        let counter = AtomicUsize::new(2);
        assert_eq!(wait_for_drain(&counter, Duration::from_millis(120)).await, 2);
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.logging.access_log = false;
        config.performance.shutdown_grace_period = 1;
        let store = FileStore::open(dir.path().join("files")).unwrap();
        let state = Arc::new(AppState::new(&config, store));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let server = tokio::spawn(async move {
            start_server_loop(listener, state, Arc::new(AtomicUsize::new(0)), shutdown_rx)
                .await
                .map_err(|e| e.to_string())
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(
                b"PUT /api/file/wire.txt HTTP/1.1\r\nHost: test\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndata",
            )
            .await
            .unwrap();
        let mut reply = String::new();
        stream.read_to_string(&mut reply).await.unwrap();
        assert!(reply.starts_with("HTTP/1.1 201 Created"), "got: {reply}");
        assert_eq!(
            std::fs::read(dir.path().join("files").join("wire.txt")).unwrap(),
            b"data"
        );

        shutdown_tx.send(true).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}

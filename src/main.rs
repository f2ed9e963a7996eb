use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod store;

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Build the Tokio runtime; `server.workers` overrides the CPU-count default
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let store = store::FileStore::open(&cfg.storage.upload_root).map_err(|e| {
        format!(
            "Failed to prepare upload root '{}': {e}",
            cfg.storage.upload_root
        )
    })?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg, store.root());

    let (shutdown_tx, shutdown_rx) = server::shutdown_channel();
    server::start_signal_handler(shutdown_tx)?;

    let state = Arc::new(config::AppState::new(&cfg, store));
    let active_connections = Arc::new(AtomicUsize::new(0));

    server::start_server_loop(listener, state, active_connections, shutdown_rx).await
}

use std::{io, net::SocketAddr, process, sync::Arc, thread};

use crossbeam_channel::Receiver;
use signal_hook::{consts, iterator::Signals};
use tokio::{net::TcpListener, runtime::Runtime};
use tracing::{error, info};

use crate::{config::read_config, logger::init_logger, routes::routes, state::ApiState};

pub fn run() {
    let config = read_config();
    init_logger(config.logger.clone());

    info!("Starting averager with config:\n{config:#?}");
    let runtime = Runtime::new()
        .unwrap_or_else(|err| panic!("Failed to start tokio runtime.\n{err}"));
    let state = ApiState::new(config)
        .unwrap_or_else(|err| panic!("Failed to start averager instance.\n{err}"));

    let (should_close_sender, should_close_receiver) = crossbeam_channel::bounded(1);
    let server_thread = thread::Builder::new()
        .name("HTTP server thread".to_string())
        .spawn(move || {
            if let Err(err) = run_api(Arc::new(state), runtime, should_close_receiver) {
                error!(%err, "HTTP server failed");
                process::exit(1);
            }
        })
        .unwrap_or_else(|err| panic!("Failed to spawn HTTP server thread.\n{err}"));

    let mut signals = Signals::new([consts::SIGINT, consts::SIGTERM])
        .unwrap_or_else(|err| panic!("Failed to register signal handlers.\n{err}"));
    if let Some(signal) = signals.forever().next() {
        info!(signal, "Shutting down HTTP server");
    }

    // Receiver is gone only if the server already stopped on its own.
    let _ = should_close_sender.send(());
    if server_thread.join().is_err() {
        error!("HTTP server thread panicked");
    }
}

pub fn run_api(
    state: Arc<ApiState>,
    runtime: Runtime,
    should_close: Receiver<()>,
) -> io::Result<()> {
    runtime.block_on(async {
        let port = state.config.api_port;
        let app = routes(state);
        let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::task::spawn_blocking(move || should_close.recv()).await;
            })
            .await
    })
}

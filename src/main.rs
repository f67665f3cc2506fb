use averager::server;
use tracing::info;

fn main() {
    server::run();

    info!("Received exit signal. Terminating...")
}

use std::sync::Arc;

use pak_builders::config::{AppState, Config};
use pak_builders::error::StartupError;
use pak_builders::{logger, server};

fn main() -> Result<(), StartupError> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honouring the configured worker count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(&cfg)?);

    let listener = server::create_reusable_listener(addr)
        .map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_site_start(&addr, &cfg, state.router.root());
    server::signal::start_signal_handler(Arc::clone(&state));

    server::run(listener, state).await?;
    Ok(())
}

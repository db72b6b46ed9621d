use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use medgate::api::server::start_server;
use medgate::config::{self, Settings};
use medgate::core_state::CoreState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = Settings::from_env();
    tracing::info!(
        answer_agent = settings.answer_agent_url.is_some(),
        specialist_agent = settings.specialist_agent_url.is_some(),
        "collaborator availability"
    );

    let core = Arc::new(CoreState::new(&settings));
    let addr = SocketAddr::new(settings.bind_addr, settings.port);

    let mut server = match start_server(core, addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.shutdown();
}

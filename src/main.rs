use std::net::SocketAddr;
use taskboard::config::{resolve_port, Config};
use taskboard::routes::RouteTable;
use taskboard::{fragment_host, HostState};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let state = HostState::new(RouteTable::for_variant(config.variant), config.api_url.clone());
    let app = fragment_host(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], resolve_port()));
    info!(variant = ?config.variant, api = %config.api_url, "serving views on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

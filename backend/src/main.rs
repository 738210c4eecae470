use slots_wallet::config::WalletConfig;
use slots_wallet::{create_router, logging, serve, shutdown_signal, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::setup();

    let config = WalletConfig::from_env()?;
    let app = create_router(AppState::default(), config.allowed_origin.clone());

    info!("Wallet listening on {}", config.addr);
    let listener = TcpListener::bind(config.addr).await?;
    serve(listener, app, shutdown_signal()).await?;

    info!("Wallet stopped");
    Ok(())
}

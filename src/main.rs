//! Bounty Admin Gate: back-office API for the bug-bounty platform, guarded by
//! HS256 admin tokens.
//! Used by: binary entrypoint.

pub mod config;
pub mod console;
pub mod credentials;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod server;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod throttle;
pub mod token;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().inspect_err(|e| tracing::error!(error = %e, "refusing to start"))?;
    let state = state::build_state(&config)?;

    console::print_banner();
    tracing::info!(addr = %config.bind_addr, db = %config.database_path, "starting bounty admin gate");
    console::print_startup(&config.bind_addr);

    server::run(state, &config.bind_addr).await?;
    Ok(())
}

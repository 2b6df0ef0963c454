mod config;
mod main_lib;

use config::Config;
use main_lib::{build_coordinator, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    let coordinator = build_coordinator(&config);
    tracing::debug!("Looking up {}", config.postal_code);
    let outcome = coordinator.race(&config.postal_code).await;

    println!("{}", outcome);
    Ok(())
}

use std::sync::Arc;

use cepfinder_lookup::{AddressProvider, BrasilApiProvider, RaceCoordinator, ViaCepProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

/// Log events go to stderr; stdout is reserved for the single result line.
pub fn init_tracing(format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_coordinator(config: &Config) -> RaceCoordinator {
    let providers: Vec<Arc<dyn AddressProvider>> = vec![
        Arc::new(ViaCepProvider::with_base_url(config.via_cep_url.clone())),
        Arc::new(BrasilApiProvider::with_base_url(config.brasil_api_url.clone())),
    ];
    RaceCoordinator::with_config(providers, config.retry.clone(), config.deadline)
}

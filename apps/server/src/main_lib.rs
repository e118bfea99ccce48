use std::sync::Arc;

use portfolio_analytics_core::{
    repository::{
        FallbackPortfolioRepository, JsonFilePortfolioRepository, PortfolioRepositoryTrait,
        RemotePortfolioRepository, StaticPortfolioRepository,
    },
    service::{PortfolioService, PortfolioServiceTrait},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::Config,
    events::{EventBus, EventBusSink},
};

const EVENT_BUS_CAPACITY: usize = 256;

pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub event_bus: EventBus,
}

impl AppState {
    pub fn new(portfolio_service: Arc<dyn PortfolioServiceTrait>, event_bus: EventBus) -> Self {
        Self {
            portfolio_service,
            event_bus,
        }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("PA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Chains the configured sources in priority order: remote API, then data
/// file, then the built-in dataset. Each source falls through to the next
/// when it fails or has no holdings.
pub fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn PortfolioRepositoryTrait>> {
    let mut repository: Arc<dyn PortfolioRepositoryTrait> =
        Arc::new(StaticPortfolioRepository::new());

    if let Some(path) = &config.data_file {
        tracing::info!("Using portfolio data file {}", path.display());
        repository = Arc::new(FallbackPortfolioRepository::new(
            Arc::new(JsonFilePortfolioRepository::new(path)),
            repository,
        ));
    }

    if let Some(url) = &config.remote_url {
        tracing::info!("Using remote portfolio API {}", url);
        repository = Arc::new(FallbackPortfolioRepository::new(
            Arc::new(RemotePortfolioRepository::new(url)?),
            repository,
        ));
    }

    Ok(repository)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let repository = build_repository(config)?;
    tracing::info!("Portfolio source: {}", repository.source_name());

    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
    let event_sink = Arc::new(EventBusSink::new(event_bus.clone()));

    let mut service = PortfolioService::new(repository, event_sink);
    if let Some(advisory) = &config.advisory {
        tracing::info!(
            "Advisory override: diversification {}, risk {}",
            advisory.diversification_score,
            advisory.risk_level
        );
        service = service.with_advisory(advisory.clone());
    }

    Ok(Arc::new(AppState::new(Arc::new(service), event_bus)))
}

pub mod api;
pub mod config;
pub mod data_structures;
pub mod error;

use crate::data_structures::{AppState, ServiceInfo};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;
use valuation_explorer::{api::ValuationAnalyzer, services::RecordSource};

const DEFAULT_LOG_FILTER: &str = "valuation_desk=info,valuation_explorer=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    // Global span with the service name for all subsequent logs
    let _span = tracing::info_span!("service", name = %app_config.service_name).entered();

    tracing::info!("Starting valuation-desk");
    tracing::info!(
        environment = %app_config.environment,
        port = app_config.port,
        records_source = %app_config.records_source,
        "Loaded configuration"
    );

    // The record set is loaded exactly once; a failure here ends the process.
    let source = RecordSource::parse(&app_config.records_source);
    let analyzer = match ValuationAnalyzer::load(&source).await {
        Ok(analyzer) => analyzer,
        Err(e) => {
            tracing::error!(error = %e, source = %source.describe(), "Record load failed, not serving");
            return Err(e.into());
        }
    };
    tracing::info!(record_count = analyzer.records().len(), "Record set ready");

    let state = AppState::new(
        analyzer,
        ServiceInfo {
            name: app_config.service_name.clone(),
            environment: app_config.environment.clone(),
        },
    );
    let app = api::router(state, app_config.cors_allow_any_origin);

    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.port));
    tracing::info!(%addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

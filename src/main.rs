use dotenvy::dotenv;
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use deskserver::api_router::configure_api_routes;
use deskserver::config::AppConfig;
use deskserver::llm::GroqClient;
use deskserver::policies::PolicyCatalog;
use deskserver::retrieval::KeywordRetriever;
use deskserver::shared::state::AppState;
use deskserver::tickets::store::{TicketStore, TriageLogStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = AppConfig::from_env();

    let store = TicketStore::open(&config.storage.tickets_path)?;
    let triage_log = TriageLogStore::open(&config.storage.triage_log_path)?;
    let llm_provider = Arc::new(GroqClient::new(
        config.llm.api_key.clone(),
        Some(config.llm.api_url.clone()),
        config.llm.model.clone(),
    ));

    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        triage_log,
        policies: PolicyCatalog::builtin(),
        retriever: Arc::new(KeywordRetriever),
        llm_provider,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = configure_api_routes()
        .layer(cors)
        .with_state(app_state);

    info!(
        "Starting HTTP server on {}:{}",
        config.server.host, config.server.port
    );
    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

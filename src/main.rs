// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::application::auth_service::AuthService;
use crate::application::chart_registry::ChartRegistry;
use crate::application::content_fetcher::ContentFetcher;
use crate::application::dashboard_service::DashboardService;
use crate::application::data_manager::DataManager;
use crate::application::navigation::NavigationController;
use crate::application::resource_tracker::ResourceTracker;
use crate::infrastructure::config::{load_app_config, load_sections_config};
use crate::infrastructure::fragment_sources::source_for;
use crate::infrastructure::sqlite_repository::SqliteRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    app_login, app_logout, create_contract, create_royalty, delete_contract, delete_royalty,
    get_component, health_check, invalidate_cache, invalidate_section, list_contracts,
    list_royalties, list_royalty_records, list_sections, login, navigate, root,
    submit_royalty_record, update_contract, update_royalty,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;
    let sections_config = load_sections_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(SqliteRepository::open(&app_config.server.database)?);
    repository.init()?;

    // Create services (application layer)
    let fetcher = Arc::new(ContentFetcher::new(
        source_for(&app_config.content.base_locations),
        app_config.content.base_locations.clone(),
    ));
    let registry = Arc::new(ChartRegistry::new(app_config.charts.engine_available));
    let data_manager = Arc::new(DataManager::with_sample_data(
        chrono::Utc::now().date_naive(),
    ));
    let dashboard = Arc::new(DashboardService::new(data_manager.clone()));
    let resources = Arc::new(ResourceTracker::new());
    let sections = sections_config
        .sections
        .into_iter()
        .map(|s| s.into_section())
        .collect();
    let navigation = Arc::new(NavigationController::new(
        sections,
        fetcher,
        registry,
        dashboard,
        resources,
        app_config.charts.refresh_secs,
    ));

    // Log section lifecycle transitions as they happen
    let mut events = navigation.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::debug!("section lifecycle: {:?}", event);
        }
    });

    // Create application state
    let state = Arc::new(AppState {
        auth_service: Arc::new(AuthService::new()),
        repository,
        navigation,
        data_manager,
        fragment_dir: app_config.content.fragment_dir.clone(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(root))
        .route("/healthz", get(health_check))
        .route("/login", post(login))
        .route("/royalties", get(list_royalties).post(create_royalty))
        .route("/royalties/:id", put(update_royalty).delete(delete_royalty))
        .route("/contracts", get(list_contracts).post(create_contract))
        .route("/contracts/:id", put(update_contract).delete(delete_contract))
        .route("/components/:id", get(get_component))
        .route("/app/login", post(app_login))
        .route("/app/logout", post(app_logout))
        .route("/app/sections", get(list_sections))
        .route("/app/navigate/:id", post(navigate))
        .route("/app/invalidate", post(invalidate_cache))
        .route("/app/invalidate/:id", post(invalidate_section))
        .route(
            "/app/royalty-records",
            get(list_royalty_records).post(submit_royalty_record),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::new(app_config.server.host.parse()?, app_config.server.port);
    println!("Mining Royalties Manager listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

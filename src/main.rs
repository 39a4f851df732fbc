use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::{error, info};
use travel_journal::application::user_service::UserService;
use travel_journal::data::memory::InMemoryUserRepository;
use travel_journal::infrastructure::config::AppConfig;
use travel_journal::infrastructure::logging::init_logging;
use travel_journal::presentation::cors::cors;
use travel_journal::presentation::handlers::AppState;
use travel_journal::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};
use travel_journal::presentation::routes::{API_SCOPE, configure};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging("info");
            error!(error = %e, "Invalid configuration");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&config.log_level);
    info!(?config, "Configuration loaded");

    let repository = InMemoryUserRepository::new();
    let users = UserService::new(Arc::new(repository));
    let state = web::Data::new(AppState { users });

    let cors_origins = config.cors_allowed_origins.clone();
    let server = HttpServer::new(move || {
        tracing::trace!("Creating new application instance");
        App::new()
            .app_data(state.clone())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors(&cors_origins))
            .configure(configure)
    });

    let bind_addr = config.bind_address();
    let server = server.bind(bind_addr.clone())?;
    info!(
        host = %bind_addr.0,
        port = bind_addr.1,
        scope = API_SCOPE,
        "Starting HTTP server"
    );
    server.run().await
}

use application::UserApp;
use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

use config::Config;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Clone)]
pub struct AppState {
    pub user_app: Arc<UserApp>,
    pub service_name: String,
}

impl AppState {
    pub fn new(user_app: Arc<UserApp>, service_name: impl Into<String>) -> Self {
        Self {
            user_app,
            service_name: service_name.into(),
        }
    }
}

/// Build the application router.
///
/// Every request goes through `handlers::dispatch`, which owns the route
/// table. CORS headers are attached to every response, errors included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::dispatch)
        .layer(middleware::from_fn(log_request))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
        .layer(cors_header(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// One line per handled request: `<METHOD> <path> - <status>`.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    info!("{} {} - {}", method, path, response.status().as_u16());

    response
}

/// Bind the listener and serve until Ctrl-C or SIGTERM.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let user_app = Arc::new(UserApp::new());
    let app = router(AppState::new(user_app, config.service_name.clone()));

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Starting {} on {}", config.service_name, bind_address);
    info!("Health check available at: http://localhost:{}/health", config.api_port);
    info!("API info available at: http://localhost:{}/api", config.api_port);
    info!("Users API available at: http://localhost:{}/api/users", config.api_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down gracefully..."),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully..."),
    }
}

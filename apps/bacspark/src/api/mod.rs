//! # HTTP API
//!
//! axum server over a single in-memory [`Session`].
//!
//! ```text
//! GET  /health                 liveness
//! GET  /categories             catalog with lock status
//! GET  /activation             currently unlocked category
//! POST /redeem                 {"code": "..."}
//! GET  /admin/codes            available codes (category, page, per_page)
//! GET  /admin/summary          available/used counts per category
//! GET  /admin/history          used codes, oldest first
//! POST /admin/codes/{id}/use   mark a code used
//! ```
//!
//! Admin routes require `Authorization: Basic base64(email:password)`.

mod error;
mod handlers;
pub mod types;

pub use error::ApiError;

use crate::auth::{self, CredentialVerifier, DenyAll};
use crate::config::ServerConfig;
use crate::error::AppError;
use axum::{
    Router,
    extract::{Request, State},
    http::{Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use bacspark_core::Session;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub validation_delay: Duration,
}

impl AppState {
    /// Wrap a session with the verifier and delay from `config`.
    pub fn new(session: Session, config: &ServerConfig) -> Self {
        let verifier: Arc<dyn CredentialVerifier> = match &config.admin {
            Some(creds) => Arc::new(creds.clone()),
            None => Arc::new(DenyAll),
        };

        Self {
            session: Arc::new(RwLock::new(session)),
            verifier,
            validation_delay: config.validation_delay,
        }
    }
}

/// Build the router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/codes", get(handlers::admin_codes_handler))
        .route("/codes/{id}/use", post(handlers::admin_mark_used_handler))
        .route("/summary", get(handlers::admin_summary_handler))
        .route("/history", get(handlers::admin_history_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/categories", get(handlers::categories_handler))
        .route("/activation", get(handlers::activation_handler))
        .route("/redeem", post(handlers::redeem_handler))
        .nest("/admin", admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Reject admin requests without valid Basic credentials.
async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(auth::parse_basic);

    match credentials {
        Some((email, password)) if state.verifier.verify(&email, &password) => {
            Ok(next.run(request).await)
        }
        Some(_) => {
            warn!(path = %request.uri().path(), "Admin request with wrong credentials");
            Err(ApiError::Unauthorized)
        }
        None => Err(ApiError::Unauthorized),
    }
}

/// Run the server until Ctrl+C or SIGTERM.
pub async fn run_server(config: ServerConfig) -> Result<(), AppError> {
    let state = AppState::new(Session::new(), &config);
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind).await?;
    info!("BAC Spark listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

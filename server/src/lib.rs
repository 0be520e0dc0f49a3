//! HTTP surface of the todo service.
//!
//! # Design
//! Routing is an explicit method+path table mapping to plain async handler
//! functions. Handlers reach storage only through the injected
//! `Arc<dyn TodoStore>`, so the same router runs against SQLite in
//! production and `MemoryStore` in tests.

pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, MethodRouter},
    Router,
};
use tokio::{net::TcpListener, signal};
use todo_core::TodoStore;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

pub fn app(store: Arc<dyn TodoStore>) -> Router {
    let state = AppState { store };
    let router = Router::new();
    let router = route_with_slash(router, "/todos", get(list_todos).post(create_todo));
    let router = route_with_slash(
        router,
        "/todos/{id}",
        get(get_todo).post(update_todo).delete(delete_todo),
    );
    let router = route_with_slash(router, "/todos/{id}/delete", post(delete_todo));
    let router = route_with_slash(router, "/todos/delete/{id}", post(delete_todo));
    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Register `path` both with and without a trailing slash.
fn route_with_slash(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

/// CORS for the browser client. Origins that are not valid header values are
/// skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Serve `app` on `listener` until Ctrl+C or SIGTERM.
pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

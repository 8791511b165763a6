//! In-memory todo API served over HTTP with axum.
//!
//! # Design
//! - One `TodoStore` per process, created by the caller and injected as router
//!   state. Nothing is persisted.
//! - Handlers only translate between HTTP and store calls; the not-found and
//!   bad-body cases are rendered by `ApiError`.

pub mod config;
pub mod cors;
pub mod error;
pub mod model;
mod routes;
pub mod store;

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::{CorsConfig, ServerConfig};
pub use error::{ApiError, ConfigError, ServeError, StoreError};
pub use model::{CreateTodo, Message, Patch, Todo, UpdateTodo};
pub use store::TodoStore;

/// Router over a fresh, empty store with the default CORS policy.
pub fn app() -> Router {
    app_with_store(TodoStore::new())
}

pub fn app_with_store(store: TodoStore) -> Router {
    router(store, cors::default_cors_layer())
}

pub fn router(store: TodoStore, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/todos", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/todos/{id}",
            get(routes::get_todo)
                .put(routes::update_todo)
                .delete(routes::delete_todo),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serves a fresh store on `listener` with the CORS policy from `config`
/// until `shutdown` resolves.
pub async fn run<F>(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let cors = cors::build_cors_layer(&config.cors)?;
    let app = router(TodoStore::new(), cors);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

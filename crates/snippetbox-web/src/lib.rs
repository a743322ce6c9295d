//! snippetbox-web: server-rendered web UI for Snippetbox.
//!
//! Provides the axum router, page handlers, create-form validation, and the
//! middleware stack. Pages are askama templates composed from a base
//! skeleton, shared partials, and a page body.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | Latest snippets |
//! | GET | `/snippet/view/{id}` | Snippet detail |
//! | GET | `/snippet/create` | Create form |
//! | POST | `/snippet/create` | Create submission |
//! | GET | `/static/*` | Static assets |
//!
//! Anything else is a plain-text 404. A known path hit with the wrong method
//! is a 405 carrying an `Allow` header.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod templates;
pub mod validator;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use snippetbox_store::SnippetStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;

use templates::TemplateCache;

/// Static assets shipped with this crate: the default for `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/ui/static");

/// Shared state for handlers. Cheap to clone; nothing in it is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SnippetStore>,
    pub templates: Arc<TemplateCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        Self {
            store,
            templates: Arc::new(TemplateCache::new()),
        }
    }
}

/// Build the complete router (pages + static assets + middleware).
pub fn build_router(store: Arc<dyn SnippetStore>, static_dir: impl AsRef<Path>) -> Router {
    router(AppState::new(store), static_dir)
}

/// Build the router around existing state.
///
/// Layers, outermost first: panic recovery, request logging, secure headers.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/snippet/view/{id}", get(handlers::snippet_view))
        .route(
            "/snippet/create",
            get(handlers::snippet_create).post(handlers::snippet_create_post),
        )
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn(middleware::secure_headers))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(CatchPanicLayer::custom(middleware::recover_panic))
        .with_state(state)
}

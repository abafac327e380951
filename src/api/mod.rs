use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::db::Store;
use crate::qr::QrGenerator;

pub mod auth;
mod error;
mod pages;
mod passes;
mod validation;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub qr: QrGenerator,
}

pub fn create_app_state(config: &Config, store: Store) -> Arc<AppState> {
    let qr = QrGenerator::new(&config.general.static_path, &config.server.base_url);

    Arc::new(AppState { store, qr })
}

pub fn router(state: Arc<AppState>, config: &Config) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)));

    let protected_routes = Router::new()
        .route(
            "/create_outing_pass",
            get(passes::issue_form).post(passes::create_outing_pass),
        )
        .route_layer(middleware::from_fn(auth::require_login));

    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_form).post(auth::login))
        .route("/register", get(pages::register_form).post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/outing_pass/{token}", get(passes::display_outing_pass))
        .merge(protected_routes)
        .nest_service(
            "/static",
            ServeDir::new(config.general.static_path.clone()),
        )
        .layer(session_layer)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

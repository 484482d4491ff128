//! Axum router construction for the stand-in backend.
//!
//! Every path comes from [`Endpoint::path`] so the stub and the editor
//! cannot drift apart.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use hexcrawl_types::Endpoint;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the stand-in backend.
///
/// The router includes `GET /` (status page), `GET /api/world` and one
/// `POST` route per editor mutation. CORS allows any origin so a browser
/// editor served from elsewhere can reach it during development.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Snapshot
        .route(Endpoint::World.path(), get(handlers::get_world))
        // Map edits
        .route(Endpoint::Paint.path(), post(handlers::paint))
        .route(Endpoint::Site.path(), post(handlers::place_site))
        .route(Endpoint::Spawner.path(), post(handlers::place_spawner))
        .route(Endpoint::Route.path(), post(handlers::add_route))
        // Content tuning
        .route(Endpoint::Encounter.path(), post(handlers::tune_encounter))
        .route(Endpoint::RumorTemplate.path(), post(handlers::tune_rumor_template))
        .route(Endpoint::Weapon.path(), post(handlers::tune_weapon))
        .route(Endpoint::Armor.path(), post(handlers::tune_armor))
        .route(Endpoint::Wound.path(), post(handlers::tune_wound))
        .route(Endpoint::Faction.path(), post(handlers::tune_faction))
        // Time
        .route(Endpoint::Simulate.path(), post(handlers::simulate))
        .route(Endpoint::Play.path(), post(handlers::play))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

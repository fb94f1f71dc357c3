pub mod health;
pub mod internal;
pub mod party;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::middleware::{auth_middleware, service_auth_middleware};
use crate::api::AppState;

/// Create the full application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .merge(create_party_router(state.clone()))
        .merge(create_internal_router(state.clone()))
        .with_state(state)
}

/// Player-facing routes (JWT auth)
fn create_party_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/parties",
            post(party::create_party).delete(party::disband_party),
        )
        .route("/parties/mine", get(party::get_my_party))
        .route("/parties/join", post(party::join_party))
        .route("/parties/leave", post(party::leave_party))
        .route("/parties/kick", post(party::kick_member))
        .route("/parties/transfer", post(party::transfer_ownership))
        .route("/parties/invite", post(party::regenerate_invite))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Internal routes (service token auth)
fn create_internal_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/internal/parties/:partyId", get(internal::get_party_by_id))
        .route(
            "/internal/parties/player/:userId",
            get(internal::get_player_party),
        )
        .route_layer(middleware::from_fn_with_state(
            state,
            service_auth_middleware,
        ))
}

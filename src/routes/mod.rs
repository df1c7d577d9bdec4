pub mod admins;
pub mod applications;
pub mod auth;
pub mod candidates;
pub mod health;
pub mod positions;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

/// Admin-gated routes sit behind the bearer gate (with its bootstrap
/// bypass); everything else is public. Mixed paths like `/positions` end
/// up with a gated POST and a public GET after the merge.
pub fn api_routes(state: AppState) -> Router {
    let admin_api = Router::new()
        .route(
            "/admins",
            post(admins::create_admin).get(admins::list_admins),
        )
        .route(
            "/admins/:id",
            put(admins::update_admin).delete(admins::toggle_admin_status),
        )
        .route("/positions", post(positions::create_position))
        .route(
            "/positions/:id",
            put(positions::update_position).delete(positions::delete_position),
        )
        .route("/applications", get(applications::list_applications))
        .route("/applications/:id", get(applications::get_application))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_admin,
        ));

    let public_api = Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/positions", get(positions::list_positions))
        .route("/positions/:id", get(positions::get_position))
        .route("/positions/:id/apply", post(positions::apply_to_position))
        .route("/candidates", get(candidates::list_candidates))
        .route("/candidates/:id", get(candidates::get_candidate));

    Router::new()
        .merge(admin_api)
        .merge(public_api)
        .with_state(state)
}

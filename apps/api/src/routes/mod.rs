pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Rubric management
        .route(
            "/api/ats/parameters",
            get(handlers::handle_list_parameters).post(handlers::handle_create_parameters),
        )
        .route(
            "/api/ats/parameters/:id",
            put(handlers::handle_update_parameters),
        )
        // Scoring
        .route(
            "/api/ats/calculate-score",
            post(handlers::handle_calculate_score),
        )
        .route(
            "/api/ats/calculate-opportunity-score",
            post(handlers::handle_calculate_opportunity_score),
        )
        // Ranking
        .route(
            "/api/ats/recommended-candidates/:opportunity_id",
            get(handlers::handle_recommended_candidates),
        )
        .route(
            "/api/candidates/opportunity/:opportunity_id",
            get(handlers::handle_opportunity_applicants),
        )
        .with_state(state)
}

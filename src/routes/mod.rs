pub mod batch_routes;
pub mod candidate_routes;
pub mod dashboard;
pub mod health;
pub mod job_routes;
pub mod public;
pub mod stage_routes;
pub mod tracking_routes;

use crate::config::get_config;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let base_routes = Router::new().route("/health", get(health::health));

    let public_api = Router::new()
        .route("/api/public/jobs", get(job_routes::list_public_jobs))
        .route(
            "/api/public/applications",
            post(public::submit_application),
        );

    let integration_api = Router::new()
        .route(
            "/api/integration/candidates",
            get(candidate_routes::list_candidates).post(candidate_routes::create_candidate),
        )
        .route(
            "/api/integration/candidates/watch",
            get(candidate_routes::watch_candidates),
        )
        .route(
            "/api/integration/candidates/:id",
            get(candidate_routes::get_candidate)
                .patch(candidate_routes::update_candidate)
                .delete(candidate_routes::delete_candidate),
        )
        .route(
            "/api/integration/candidates/:id/stages",
            get(tracking_routes::get_candidate_stages),
        )
        .route(
            "/api/integration/candidates/:id/advance",
            post(tracking_routes::advance_candidate),
        )
        .route(
            "/api/integration/candidates/:id/notes",
            get(candidate_routes::list_notes).post(candidate_routes::add_note),
        )
        .route(
            "/api/integration/candidate-stages/:id",
            axum::routing::patch(tracking_routes::record_feedback),
        )
        .route(
            "/api/integration/stages",
            get(stage_routes::list_stages).post(stage_routes::create_stage),
        )
        .route(
            "/api/integration/stages/reorder",
            post(stage_routes::move_stage),
        )
        .route(
            "/api/integration/stages/:id",
            axum::routing::patch(stage_routes::update_stage).delete(stage_routes::delete_stage),
        )
        .route(
            "/api/integration/jobs",
            get(job_routes::list_jobs).post(job_routes::create_job),
        )
        .route(
            "/api/integration/jobs/:id",
            get(job_routes::get_job)
                .patch(job_routes::update_job)
                .delete(job_routes::delete_job),
        )
        .route(
            "/api/integration/batches",
            get(batch_routes::list_batches).post(batch_routes::create_batch),
        )
        .route(
            "/api/integration/batches/:id",
            get(batch_routes::get_batch)
                .patch(batch_routes::update_batch)
                .delete(batch_routes::delete_batch),
        )
        .route(
            "/api/integration/batches/:id/stages",
            get(batch_routes::list_assignments).put(batch_routes::assign_stages),
        )
        .route(
            "/api/integration/dashboard/stats",
            get(dashboard::get_dashboard_stats),
        );

    let uploads_dir = get_config().uploads_dir.clone();

    base_routes
        .merge(public_api)
        .merge(integration_api)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
}

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Public report routes: anonymous submission and tracking
pub fn public_routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/reports", post(handlers::create_report))
        // Path used by older form clients
        .route("/api/reports/create", post(handlers::create_report))
        .route(
            "/api/reports/track/{report_id}",
            get(handlers::track_report),
        )
        .with_state(service)
}

/// Triage routes, nested under `/api/admin` behind the auth middleware
pub fn admin_routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/reports", get(handlers::list_reports))
        .route("/reports/summary", get(handlers::get_summary))
        .route(
            "/reports/{report_id}",
            get(handlers::get_report).patch(handlers::update_report_status),
        )
        .with_state(service)
}

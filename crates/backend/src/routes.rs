use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::catalog::Catalog;
use crate::handlers;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub catalog: Arc<Catalog>,
}

/// Application route table
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CATALOG: academic background
        // ========================================
        .route("/api/catalog/states", get(handlers::catalog::states))
        .route(
            "/api/catalog/states/:state_id/districts",
            get(handlers::catalog::districts),
        )
        .route(
            "/api/catalog/districts/:district_id/school-types",
            get(handlers::catalog::school_types),
        )
        .route(
            "/api/catalog/districts/:district_id/school-types/:type_id/schools",
            get(handlers::catalog::schools),
        )
        .route(
            "/api/catalog/districts/:district_id/college-types",
            get(handlers::catalog::college_types),
        )
        .route(
            "/api/catalog/districts/:district_id/college-types/:type_id/colleges",
            get(handlers::catalog::colleges),
        )
        // ========================================
        // CATALOG: orientation
        // ========================================
        .route("/api/catalog/cities", get(handlers::catalog::cities))
        .route(
            "/api/catalog/cities/:city_id/campuses",
            get(handlers::catalog::campuses),
        )
        .route(
            "/api/catalog/campuses/:campus_id/classes",
            get(handlers::catalog::classes),
        )
        .route(
            "/api/catalog/campuses/:campus_id/classes/:class_id/orientations",
            get(handlers::catalog::orientations),
        )
        .route(
            "/api/catalog/orientations/:orientation_id/student-types",
            get(handlers::catalog::student_types),
        )
        .route(
            "/api/catalog/orientations/:orientation_id/student-types/:student_type_id/fee",
            get(handlers::catalog::fee),
        )
        // ========================================
        // CATALOG: payment banks
        // ========================================
        .route(
            "/api/catalog/organizations",
            get(handlers::catalog::organizations),
        )
        .route(
            "/api/catalog/organizations/:org_id/banks",
            get(handlers::catalog::banks),
        )
        .route(
            "/api/catalog/banks/:bank_id/branches",
            get(handlers::catalog::bank_branches),
        )
        // ========================================
        // APPLICATIONS
        // ========================================
        .route(
            "/api/applications",
            post(handlers::a001_application::submit),
        )
        .route(
            "/api/applications/:application_no/overview",
            get(handlers::a001_application::overview),
        )
        .route(
            "/api/applications/:application_no/payment",
            post(handlers::a001_application::record_payment),
        )
        .with_state(state)
}

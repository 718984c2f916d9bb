use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::enums::Track;
use contracts::shared::catalog::*;
use contracts::shared::envelope::{DataEnvelope, ItemsEnvelope, ResultsEnvelope};
use serde::Deserialize;

use crate::domain::catalog::CatalogError;
use crate::routes::AppState;

type ApiResult<T> = Result<Json<T>, StatusCode>;

fn status(e: CatalogError) -> StatusCode {
    match e {
        CatalogError::NotFound { .. } => {
            tracing::debug!("catalog: {}", e);
            StatusCode::NOT_FOUND
        }
        other => {
            tracing::error!("catalog: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// ============================================================================
// Academic background
// ============================================================================

/// GET /api/catalog/states
pub async fn states(State(state): State<AppState>) -> Json<Vec<StateRecord>> {
    Json(state.catalog.states())
}

/// GET /api/catalog/states/:state_id/districts
pub async fn districts(
    State(state): State<AppState>,
    Path(state_id): Path<i64>,
) -> ApiResult<DataEnvelope<Vec<DistrictRecord>>> {
    let data = state.catalog.districts(state_id).map_err(status)?;
    Ok(Json(DataEnvelope { data }))
}

/// GET /api/catalog/districts/:district_id/school-types
pub async fn school_types(
    State(state): State<AppState>,
    Path(district_id): Path<i64>,
) -> ApiResult<ItemsEnvelope<InstitutionTypeRecord>> {
    let items = state.catalog.school_types(district_id).map_err(status)?;
    Ok(Json(items.into()))
}

/// GET /api/catalog/districts/:district_id/school-types/:type_id/schools
pub async fn schools(
    State(state): State<AppState>,
    Path((district_id, type_id)): Path<(i64, i64)>,
) -> ApiResult<ResultsEnvelope<SchoolRecord>> {
    let results = state.catalog.schools(district_id, type_id).map_err(status)?;
    Ok(Json(results.into()))
}

/// GET /api/catalog/districts/:district_id/college-types
pub async fn college_types(
    State(state): State<AppState>,
    Path(district_id): Path<i64>,
) -> ApiResult<ItemsEnvelope<InstitutionTypeRecord>> {
    let items = state.catalog.college_types(district_id).map_err(status)?;
    Ok(Json(items.into()))
}

/// GET /api/catalog/districts/:district_id/college-types/:type_id/colleges
pub async fn colleges(
    State(state): State<AppState>,
    Path((district_id, type_id)): Path<(i64, i64)>,
) -> ApiResult<ResultsEnvelope<CollegeRecord>> {
    let results = state.catalog.colleges(district_id, type_id).map_err(status)?;
    Ok(Json(results.into()))
}

// ============================================================================
// Orientation
// ============================================================================

/// GET /api/catalog/cities
pub async fn cities(State(state): State<AppState>) -> Json<Vec<CityRecord>> {
    Json(state.catalog.cities())
}

#[derive(Debug, Deserialize)]
pub struct CampusQuery {
    pub track: Option<String>,
}

/// GET /api/catalog/cities/:city_id/campuses?track=school|college
pub async fn campuses(
    State(state): State<AppState>,
    Path(city_id): Path<i64>,
    Query(query): Query<CampusQuery>,
) -> ApiResult<DataEnvelope<Vec<CampusRecord>>> {
    let track = match query.track.as_deref().filter(|t| !t.is_empty()) {
        Some(code) => Some(Track::from_code(code).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };
    let data = state.catalog.campuses(city_id, track).map_err(status)?;
    Ok(Json(DataEnvelope { data }))
}

/// GET /api/catalog/campuses/:campus_id/classes
pub async fn classes(
    State(state): State<AppState>,
    Path(campus_id): Path<i64>,
) -> ApiResult<ItemsEnvelope<ClassRecord>> {
    let items = state.catalog.classes(campus_id).map_err(status)?;
    Ok(Json(items.into()))
}

/// GET /api/catalog/campuses/:campus_id/classes/:class_id/orientations
pub async fn orientations(
    State(state): State<AppState>,
    Path((campus_id, class_id)): Path<(i64, i64)>,
) -> ApiResult<DataEnvelope<ItemsEnvelope<OrientationRecord>>> {
    let items = state
        .catalog
        .orientations(campus_id, class_id)
        .map_err(status)?;
    Ok(Json(DataEnvelope { data: items.into() }))
}

/// GET /api/catalog/orientations/:orientation_id/student-types
pub async fn student_types(
    State(state): State<AppState>,
    Path(orientation_id): Path<i64>,
) -> ApiResult<Vec<StudentTypeRecord>> {
    state
        .catalog
        .student_types(orientation_id)
        .map(Json)
        .map_err(status)
}

/// GET /api/catalog/orientations/:orientation_id/student-types/:student_type_id/fee
pub async fn fee(
    State(state): State<AppState>,
    Path((orientation_id, student_type_id)): Path<(i64, String)>,
) -> ApiResult<FeeRecord> {
    state
        .catalog
        .fee(orientation_id, &student_type_id)
        .map(Json)
        .map_err(status)
}

// ============================================================================
// Payment banks
// ============================================================================

/// GET /api/catalog/organizations
pub async fn organizations(State(state): State<AppState>) -> Json<Vec<OrganizationRecord>> {
    Json(state.catalog.organizations())
}

/// GET /api/catalog/organizations/:org_id/banks
pub async fn banks(
    State(state): State<AppState>,
    Path(org_id): Path<i64>,
) -> ApiResult<DataEnvelope<Vec<BankRecord>>> {
    let data = state.catalog.banks(org_id).map_err(status)?;
    Ok(Json(DataEnvelope { data }))
}

/// GET /api/catalog/banks/:bank_id/branches
pub async fn bank_branches(
    State(state): State<AppState>,
    Path(bank_id): Path<i64>,
) -> ApiResult<ResultsEnvelope<BankBranchRecord>> {
    let results = state.catalog.bank_branches(bank_id).map_err(status)?;
    Ok(Json(results.into()))
}

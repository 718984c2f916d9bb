use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_application::aggregate::{
    ApplicationOverview, ApplicationSubmission, SubmitApplicationResponse,
};
use contracts::domain::a002_payment::aggregate::{PaymentReceipt, PaymentSubmission};
use serde_json::{json, Value};

use crate::domain::a001_application::service;
use crate::routes::AppState;

type ErrorResponse = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(json!({ "error": message.into() })))
}

fn internal(e: anyhow::Error) -> ErrorResponse {
    tracing::error!("applications: {:#}", e);
    error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

/// POST /api/applications
pub async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<ApplicationSubmission>,
) -> Result<Json<SubmitApplicationResponse>, ErrorResponse> {
    service::validate_submission(&submission).map_err(|e| error(StatusCode::BAD_REQUEST, e))?;
    let requested = submission.application_no.clone();
    match service::submit(&state.db, submission).await.map_err(internal)? {
        Some(application_no) => Ok(Json(SubmitApplicationResponse { application_no })),
        None => Err(error(
            StatusCode::NOT_FOUND,
            format!(
                "application {} not found",
                requested.unwrap_or_default()
            ),
        )),
    }
}

/// GET /api/applications/:application_no/overview
pub async fn overview(
    State(state): State<AppState>,
    Path(application_no): Path<String>,
) -> Result<Json<ApplicationOverview>, ErrorResponse> {
    match service::overview(&state.db, &state.catalog, &application_no)
        .await
        .map_err(internal)?
    {
        Some(overview) => Ok(Json(overview)),
        None => Err(error(
            StatusCode::NOT_FOUND,
            format!("application {} not found", application_no),
        )),
    }
}

/// POST /api/applications/:application_no/payment
pub async fn record_payment(
    State(state): State<AppState>,
    Path(application_no): Path<String>,
    Json(payment): Json<PaymentSubmission>,
) -> Result<Json<PaymentReceipt>, ErrorResponse> {
    service::validate_payment(&payment).map_err(|e| error(StatusCode::BAD_REQUEST, e))?;
    match service::record_payment(&state.db, &application_no, payment)
        .await
        .map_err(internal)?
    {
        Some(receipt) => Ok(Json(receipt)),
        None => Err(error(
            StatusCode::NOT_FOUND,
            format!("application {} not found", application_no),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{get_json, post_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_overview_and_payment() {
        let app = test_app().await;

        let (status, created) = post_json(
            &app,
            "/api/applications",
            json!({
                "track": "college",
                "payload": {
                    "firstName": "Kiran",
                    "stateId": 28,
                    "districtId": 601,
                    "collegeTypeId": 2,
                    "collegeId": 7004,
                    "cityId": 2,
                    "campusId": 202,
                    "classId": 11,
                    "orientationId": 9,
                    "studentTypeId": "SEMI",
                    "feeAmount": 120000.0
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let no = created["applicationNo"].as_str().unwrap().to_string();
        assert!(no.starts_with("COL-"));

        let (status, overview) = get_json(&app, &format!("/api/applications/{}/overview", no)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(overview["track"], json!("college"));
        assert_eq!(overview["data"]["collegeName"], json!("Andhra Loyola College"));
        assert_eq!(overview["data"]["branchName"], json!("Gollapudi"));
        assert_eq!(overview["data"]["studentType"], json!("Semi-residential"));
        assert!(overview["data"].get("collegeId").is_none());

        let (status, receipt) = post_json(
            &app,
            &format!("/api/applications/{}/payment", no),
            json!({
                "mode": "demand_draft",
                "amount": 60000.0,
                "referenceNo": "DD-88121",
                "bankDetails": {"organizationId": 2, "bankId": 22, "bankBranchId": "ANDB0000417"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["mode"], json!("demand_draft"));

        let (_, overview) = get_json(&app, &format!("/api/applications/{}/overview", no)).await;
        assert_eq!(overview["payments"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejections() {
        let app = test_app().await;

        let (status, body) =
            post_json(&app, "/api/applications", json!({"track": "school", "payload": {}})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("payload is empty"));

        let (status, _) = post_json(
            &app,
            "/api/applications",
            json!({"applicationNo": "SCH-2026-04040", "track": "school", "payload": {"a": 1}}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(&app, "/api/applications/SCH-2026-04040/overview").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = post_json(
            &app,
            "/api/applications/SCH-2026-04040/payment",
            json!({"mode": "cheque", "amount": 100.0}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::reports::dtos::{
    CreateReportDto, CreateReportResponseDto, ReportQueryParams, ReportResponseDto,
    ReportSummaryDto, TrackReportResponseDto, UpdateReportStatusDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// Submit an incident report
///
/// Anonymous: no account or token is needed. Keep the returned `reportId`
/// to check on the report later.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<CreateReportResponseDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Report ID already in use"),
        (status = 503, description = "Could not generate a report ID, retry")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<CreateReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some("Report submitted successfully".to_string()),
            None,
        )),
    ))
}

/// Check the status of a submitted report
#[utoipa::path(
    get,
    path = "/api/reports/track/{report_id}",
    params(
        ("report_id" = String, Path, description = "Report ID (16 hex characters)")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<TrackReportResponseDto>),
        (status = 400, description = "Malformed report ID"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn track_report(
    State(service): State<Arc<ReportService>>,
    Path(report_id): Path<String>,
) -> Result<Json<ApiResponse<TrackReportResponseDto>>> {
    let report = service.track(&report_id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// List reports, newest first
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Matching reports", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Unknown status or type"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 503, description = "Database timeout"),
        (status = 504, description = "Database connection timeout")
    ),
    tag = "admin-reports",
    security(("bearer_auth" = []))
)]
pub async fn list_reports(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    AppQuery(params): AppQuery<ReportQueryParams>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports: Vec<ReportResponseDto> = service
        .list(params.into())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = reports.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta { total }),
    )))
}

/// Report counts per status and category
#[utoipa::path(
    get,
    path = "/api/admin/reports/summary",
    responses(
        (status = 200, description = "Summary", body = ApiResponse<ReportSummaryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin-reports",
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<ReportSummaryDto>>> {
    let summary = service.summary().await?;
    Ok(Json(ApiResponse::success(Some(summary.into()), None, None)))
}

/// Get a report with its image and coordinates
#[utoipa::path(
    get,
    path = "/api/admin/reports/{report_id}",
    params(
        ("report_id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin-reports",
    security(("bearer_auth" = []))
)]
pub async fn get_report(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Path(report_id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get_by_report_id(&report_id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Set a report's status
///
/// Any status can follow any other, including reopening a resolved report.
#[utoipa::path(
    patch,
    path = "/api/admin/reports/{report_id}",
    params(
        ("report_id" = String, Path, description = "Report ID")
    ),
    request_body = UpdateReportStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid status"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Report not found")
    ),
    tag = "admin-reports",
    security(("bearer_auth" = []))
)]
pub async fn update_report_status(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<ReportService>>,
    Path(report_id): Path<String>,
    AppJson(dto): AppJson<UpdateReportStatusDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service
        .update_status(&report_id, dto.status, &user.sub)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report status updated".to_string()),
        None,
    )))
}

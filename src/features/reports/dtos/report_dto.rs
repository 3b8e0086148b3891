use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::reports::models::{
    Report, ReportCounts, ReportFilter, ReportStatus, ReportType,
};
use crate::shared::validation::{
    empty_as_none, not_blank, valid_latitude, valid_longitude, REPORT_ID_REGEX,
};

/// Request DTO for submitting a report
///
/// A client-side `status` field is accepted and ignored: new reports always start as pending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    /// Client-generated identifier (16 lowercase hex chars). Generated server-side when omitted.
    #[validate(regex(
        path = *REPORT_ID_REGEX,
        message = "reportId must be 16 lowercase hexadecimal characters"
    ))]
    pub report_id: Option<String>,

    /// Emergency or non-emergency
    #[serde(rename = "type")]
    pub report_type: ReportType,

    /// Free-text incident type, e.g. "Theft" or "Fire Outbreak"
    #[validate(
        length(min = 1, max = 100, message = "specificType must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub specific_type: String,

    #[validate(
        length(min = 1, max = 255, message = "Title must be 1-255 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 10000, message = "Description must be 1-10000 characters"),
        custom(function = "not_blank")
    )]
    pub description: String,

    /// Free-text address
    #[validate(
        length(min = 1, max = 500, message = "Location must be 1-500 characters"),
        custom(function = "not_blank")
    )]
    pub location: String,

    #[validate(custom(function = "valid_latitude"))]
    pub latitude: Option<f64>,

    #[validate(custom(function = "valid_longitude"))]
    pub longitude: Option<f64>,

    /// Embedded image (data URL or base64)
    pub image: Option<String>,
}

/// Response DTO after a successful submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportResponseDto {
    pub report_id: String,
    pub status: ReportStatus,
}

impl From<Report> for CreateReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            report_id: r.report_id,
            status: r.status,
        }
    }
}

/// Full report as seen by the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub report_id: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub specific_type: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            report_id: r.report_id,
            report_type: r.report_type,
            specific_type: r.specific_type,
            title: r.title,
            description: r.description,
            location: r.location,
            latitude: r.latitude,
            longitude: r.longitude,
            image: r.image,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Reporter-facing view: no photo, no coordinates, no internal id
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackReportResponseDto {
    pub report_id: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub specific_type: String,
    pub title: String,
    pub location: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for TrackReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            report_id: r.report_id,
            report_type: r.report_type,
            specific_type: r.specific_type,
            title: r.title,
            location: r.location,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Request DTO for changing a report's status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReportStatusDto {
    pub status: ReportStatus,
}

/// Query params for the admin listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ReportQueryParams {
    /// Only reports with this status
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<ReportStatus>,
    /// Only reports of this category
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub report_type: Option<ReportType>,
}

impl From<ReportQueryParams> for ReportFilter {
    fn from(q: ReportQueryParams) -> Self {
        Self {
            status: q.status,
            report_type: q.report_type,
        }
    }
}

/// Counts per status and category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryDto {
    pub total_reports: i64,
    pub pending_count: i64,
    pub in_progress_count: i64,
    pub resolved_count: i64,
    pub dismissed_count: i64,
    pub emergency_count: i64,
    pub non_emergency_count: i64,
}

impl From<ReportCounts> for ReportSummaryDto {
    fn from(c: ReportCounts) -> Self {
        Self {
            total_reports: c.total,
            pending_count: c.pending,
            in_progress_count: c.in_progress,
            resolved_count: c.resolved,
            dismissed_count: c.dismissed,
            emergency_count: c.emergency,
            non_emergency_count: c.non_emergency,
        }
    }
}

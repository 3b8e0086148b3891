use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Report category matching database enum
///
/// Older clients send `NON_EMERGENCY` / `non-emergency`; both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[serde(alias = "EMERGENCY")]
    Emergency,
    #[serde(alias = "NON_EMERGENCY", alias = "non-emergency")]
    NonEmergency,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Emergency => write!(f, "emergency"),
            ReportType::NonEmergency => write!(f, "non_emergency"),
        }
    }
}

/// Report triage status matching database enum
///
/// Any status may follow any other; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "IN_PROGRESS", alias = "in-progress")]
    InProgress,
    #[serde(alias = "RESOLVED")]
    Resolved,
    #[serde(alias = "DISMISSED")]
    Dismissed,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Pending => write!(f, "pending"),
            ReportStatus::InProgress => write!(f, "in_progress"),
            ReportStatus::Resolved => write!(f, "resolved"),
            ReportStatus::Dismissed => write!(f, "dismissed"),
        }
    }
}

/// Database model for report
#[derive(Debug, Clone, FromRow)]
pub struct Report {
    pub id: Uuid,
    pub report_id: String,
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

/// Data for creating a new report. Status is not part of it: new reports are always pending.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub report_id: String,
    pub report_type: ReportType,
    pub specific_type: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image: Option<String>,
}

/// Optional filters for the admin listing (AND-ed together)
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub report_type: Option<ReportType>,
}

impl ReportFilter {
    /// In-process equivalent of the listing's WHERE clause
    #[cfg(test)]
    pub fn matches(&self, report: &Report) -> bool {
        self.status.map_or(true, |s| s == report.status)
            && self.report_type.map_or(true, |t| t == report.report_type)
    }
}

/// Aggregate counts over all reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct ReportCounts {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub dismissed: i64,
    pub emergency: i64,
    pub non_emergency: i64,
}

use std::sync::Arc;
use std::time::Duration;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::CreateReportDto;
use crate::features::reports::identifier::{generate_report_id, is_valid_report_id};
use crate::features::reports::models::{
    CreateReport, Report, ReportCounts, ReportFilter, ReportStatus,
};
use crate::features::reports::repositories::ReportRepository;

/// Service for report operations
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    query_timeout: Duration,
}

impl ReportService {
    pub fn new(repository: Arc<dyn ReportRepository>, query_timeout: Duration) -> Self {
        Self {
            repository,
            query_timeout,
        }
    }

    /// Create a report from an anonymous submission.
    ///
    /// Uses the client's identifier when one is supplied, otherwise generates one.
    /// Status always starts as `pending`.
    pub async fn create(&self, dto: CreateReportDto) -> Result<Report> {
        let report_id = match dto.report_id {
            Some(id) => id,
            None => generate_report_id()?,
        };

        let data = CreateReport {
            report_id,
            report_type: dto.report_type,
            specific_type: dto.specific_type.trim().to_string(),
            title: dto.title.trim().to_string(),
            description: dto.description.trim().to_string(),
            location: dto.location.trim().to_string(),
            latitude: dto.latitude,
            longitude: dto.longitude,
            image: dto.image.filter(|i| !i.is_empty()),
        };

        let report = self.repository.insert(&data).await?;

        tracing::info!(
            "Report submitted: {} (type: {}, has_image: {})",
            report.report_id,
            report.report_type,
            report.image.is_some()
        );

        Ok(report)
    }

    /// List reports newest first, bounded by the configured query timeout
    pub async fn list(&self, filter: ReportFilter) -> Result<Vec<Report>> {
        match tokio::time::timeout(self.query_timeout, self.repository.list(&filter)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    "Report listing exceeded {}s (status: {:?}, type: {:?})",
                    self.query_timeout.as_secs_f32(),
                    filter.status,
                    filter.report_type
                );
                Err(AppError::ServiceUnavailable("Database timeout".to_string()))
            }
        }
    }

    /// Get report by its public identifier
    pub async fn get_by_report_id(&self, report_id: &str) -> Result<Report> {
        let report_id = normalize_report_id(report_id);
        self.repository
            .find_by_report_id(&report_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))
    }

    /// Look up a report for the reporter-facing tracking page
    pub async fn track(&self, report_id: &str) -> Result<Report> {
        let report_id = normalize_report_id(report_id);
        if !is_valid_report_id(&report_id) {
            return Err(AppError::BadRequest(
                "Report ID must be 16 hexadecimal characters".to_string(),
            ));
        }
        self.get_by_report_id(&report_id).await
    }

    /// Set a report's status. Any status may follow any other.
    pub async fn update_status(
        &self,
        report_id: &str,
        status: ReportStatus,
        actor: &str,
    ) -> Result<Report> {
        let report_id = normalize_report_id(report_id);
        let previous = self.get_by_report_id(&report_id).await?;

        let report = self
            .repository
            .update_status(&report_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        tracing::info!(
            "Report {} status changed: {} -> {} by {}",
            report_id,
            previous.status,
            report.status,
            actor
        );

        Ok(report)
    }

    /// Aggregate counts for the dashboard header
    pub async fn summary(&self) -> Result<ReportCounts> {
        self.repository.counts().await
    }
}

/// Identifiers are stored lowercase; callers may paste them in any case
fn normalize_report_id(report_id: &str) -> String {
    report_id.trim().to_ascii_lowercase()
}

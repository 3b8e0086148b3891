use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{
    CreateReport, Report, ReportCounts, ReportFilter, ReportStatus,
};

const REPORT_COLUMNS: &str = r#"
    id, report_id, report_type, specific_type, title, description,
    location, latitude, longitude, image, status, created_at, updated_at
"#;

/// Persistence boundary for reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a new report with status `pending`.
    /// A duplicate `report_id` is a `Conflict`.
    async fn insert(&self, data: &CreateReport) -> Result<Report>;

    /// Reports matching `filter`, newest first
    async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>>;

    async fn find_by_report_id(&self, report_id: &str) -> Result<Option<Report>>;

    /// Set status unconditionally and bump `updated_at`
    async fn update_status(&self, report_id: &str, status: ReportStatus)
        -> Result<Option<Report>>;

    async fn counts(&self) -> Result<ReportCounts>;
}

/// PostgreSQL-backed report repository
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn insert(&self, data: &CreateReport) -> Result<Report> {
        let sql = format!(
            r#"
            INSERT INTO reports (
                id, report_id, report_type, specific_type, title, description,
                location, latitude, longitude, image, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending')
            RETURNING {REPORT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Report>(&sql)
            .bind(Uuid::now_v7())
            .bind(&data.report_id)
            .bind(data.report_type)
            .bind(&data.specific_type)
            .bind(&data.title)
            .bind(&data.description)
            .bind(&data.location)
            .bind(data.latitude)
            .bind(data.longitude)
            .bind(&data.image)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if duplicate {
                    tracing::warn!("Duplicate report id rejected: {}", data.report_id);
                    return AppError::Conflict(format!(
                        "Report {} already exists",
                        data.report_id
                    ));
                }
                tracing::error!("Failed to create report: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT ");
        query.push(REPORT_COLUMNS).push(" FROM reports WHERE TRUE");

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(report_type) = filter.report_type {
            query.push(" AND report_type = ").push_bind(report_type);
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        query
            .build_query_as::<Report>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_report_id(&self, report_id: &str) -> Result<Option<Report>> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM reports WHERE report_id = $1");

        sqlx::query_as::<_, Report>(&sql)
            .bind(report_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report by report id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<Option<Report>> {
        let sql = format!(
            r#"
            UPDATE reports
            SET status = $2, updated_at = NOW()
            WHERE report_id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Report>(&sql)
            .bind(report_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report status: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn counts(&self) -> Result<ReportCounts> {
        sqlx::query_as::<_, ReportCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE status = 'dismissed') AS dismissed,
                COUNT(*) FILTER (WHERE report_type = 'emergency') AS emergency,
                COUNT(*) FILTER (WHERE report_type = 'non_emergency') AS non_emergency
            FROM reports
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get report counts: {:?}", e);
            AppError::Database(e)
        })
    }
}

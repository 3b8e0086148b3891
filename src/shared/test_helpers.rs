#[cfg(test)]
pub use self::helpers::*;

#[cfg(test)]
mod helpers {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{
        extract::{Query, Request},
        http::StatusCode,
        middleware::Next,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use chrono::{Duration, Utc};
    use fake::faker::address::en::StreetName;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use uuid::Uuid;

    use crate::core::config::GeocoderConfig;
    use crate::core::error::{AppError, Result};
    use crate::features::auth::model::AuthenticatedUser;
    use crate::features::reports::dtos::CreateReportDto;
    use crate::features::reports::models::{
        CreateReport, Report, ReportCounts, ReportFilter, ReportStatus, ReportType,
    };
    use crate::features::reports::repositories::ReportRepository;
    use crate::shared::constants::{ROLE_ADMIN, ROLE_MODERATOR};
    use serde_json::json;

    pub fn create_admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "test-admin".to_string(),
            email: Some("admin@example.com".to_string()),
            roles: vec![ROLE_ADMIN.to_string()],
        }
    }

    pub fn create_moderator_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "test-moderator".to_string(),
            email: None,
            roles: vec![ROLE_MODERATOR.to_string()],
        }
    }

    pub fn create_plain_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "test-user".to_string(),
            email: None,
            roles: Vec::new(),
        }
    }

    /// Inject `user` into every request, standing in for the JWT middleware
    pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
        router.layer(axum::middleware::from_fn(
            move |mut request: Request, next: Next| {
                let user = user.clone();
                async move {
                    request.extensions_mut().insert(user);
                    let response: Response = next.run(request).await;
                    response
                }
            },
        ))
    }

    pub fn with_admin_auth(router: Router) -> Router {
        with_user(router, create_admin_user())
    }

    /// The report from the reference scenario: a non-emergency broken streetlight
    pub fn sample_create_dto() -> CreateReportDto {
        let street: String = StreetName().fake();
        CreateReportDto {
            report_id: None,
            report_type: ReportType::NonEmergency,
            specific_type: "Other".to_string(),
            title: "Broken streetlight".to_string(),
            description: Sentence(5..12).fake(),
            location: format!("12 {}", street),
            latitude: Some(40.7128),
            longitude: Some(-74.006),
            image: None,
        }
    }

    /// Vec-backed repository with the same semantics as the PostgreSQL one
    #[derive(Default)]
    pub struct InMemoryReportRepository {
        reports: Mutex<Vec<Report>>,
    }

    #[async_trait]
    impl ReportRepository for InMemoryReportRepository {
        async fn insert(&self, data: &CreateReport) -> Result<Report> {
            let mut reports = self.reports.lock().unwrap();
            if reports.iter().any(|r| r.report_id == data.report_id) {
                return Err(AppError::Conflict(format!(
                    "Report {} already exists",
                    data.report_id
                )));
            }

            // Strictly increasing timestamps keep "newest first" deterministic
            let mut now = Utc::now();
            if let Some(last) = reports.last() {
                if now <= last.created_at {
                    now = last.created_at + Duration::milliseconds(1);
                }
            }

            let report = Report {
                id: Uuid::now_v7(),
                report_id: data.report_id.clone(),
                report_type: data.report_type,
                specific_type: data.specific_type.clone(),
                title: data.title.clone(),
                description: data.description.clone(),
                location: data.location.clone(),
                latitude: data.latitude,
                longitude: data.longitude,
                image: data.image.clone(),
                status: ReportStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            reports.push(report.clone());
            Ok(report)
        }

        async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>> {
            let reports = self.reports.lock().unwrap();
            let mut matching: Vec<Report> = reports
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(matching)
        }

        async fn find_by_report_id(&self, report_id: &str) -> Result<Option<Report>> {
            let reports = self.reports.lock().unwrap();
            Ok(reports.iter().find(|r| r.report_id == report_id).cloned())
        }

        async fn update_status(
            &self,
            report_id: &str,
            status: ReportStatus,
        ) -> Result<Option<Report>> {
            let mut reports = self.reports.lock().unwrap();
            Ok(reports
                .iter_mut()
                .find(|r| r.report_id == report_id)
                .map(|r| {
                    r.status = status;
                    r.updated_at = Utc::now();
                    r.clone()
                }))
        }

        async fn counts(&self) -> Result<ReportCounts> {
            let reports = self.reports.lock().unwrap();
            let count = |pred: &dyn Fn(&Report) -> bool| {
                reports.iter().filter(|r| pred(r)).count() as i64
            };
            Ok(ReportCounts {
                total: reports.len() as i64,
                pending: count(&|r: &Report| r.status == ReportStatus::Pending),
                in_progress: count(&|r: &Report| r.status == ReportStatus::InProgress),
                resolved: count(&|r: &Report| r.status == ReportStatus::Resolved),
                dismissed: count(&|r: &Report| r.status == ReportStatus::Dismissed),
                emergency: count(&|r: &Report| r.report_type == ReportType::Emergency),
                non_emergency: count(&|r: &Report| r.report_type == ReportType::NonEmergency),
            })
        }
    }

    pub fn geocoder_config(base_url: &str) -> GeocoderConfig {
        GeocoderConfig {
            base_url: base_url.to_string(),
            user_agent: "incident-report-core-tests".to_string(),
            timeout: std::time::Duration::from_secs(2),
        }
    }

    async fn fake_search(Query(params): Query<HashMap<String, String>>) -> Response {
        let q = params.get("q").cloned().unwrap_or_default();
        match q.as_str() {
            "nowhere" => Json(json!([])).into_response(),
            "boom" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            "garbled" => Json(json!([{ "lat": "north", "lon": "west" }])).into_response(),
            _ => Json(json!([{
                "place_id": 1,
                "lat": "40.7128",
                "lon": "-74.0060",
                "display_name": format!("Match for {}", q)
            }]))
            .into_response(),
        }
    }

    async fn fake_reverse(Query(params): Query<HashMap<String, String>>) -> Response {
        let lat: f64 = params
            .get("lat")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        if lat == 0.0 {
            Json(json!({ "error": "Unable to geocode" })).into_response()
        } else if lat == 1.0 {
            Json(json!({ "place_id": 2, "lat": "1.0", "lon": "2.0" })).into_response()
        } else {
            Json(json!({
                "place_id": 3,
                "lat": params.get("lat"),
                "lon": params.get("lon"),
                "display_name": "10 Downing Street, London"
            }))
            .into_response()
        }
    }

    /// Serve a Nominatim look-alike on an ephemeral port and return its base URL
    pub async fn spawn_fake_geocoder() -> String {
        let router = Router::new()
            .route("/search", get(fake_search))
            .route("/reverse", get(fake_reverse));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::geocoding::{dtos as geocoding_dtos, handlers as geocoding_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Reports (public)
        reports_handlers::create_report,
        reports_handlers::track_report,
        // Reports (admin)
        reports_handlers::list_reports,
        reports_handlers::get_summary,
        reports_handlers::get_report,
        reports_handlers::update_report_status,
        // Geocoding (public)
        geocoding_handlers::geocode,
        geocoding_handlers::reverse_geocode,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            ApiResponse<auth::dto::MeResponseDto>,
            // Reports
            reports_models::ReportType,
            reports_models::ReportStatus,
            reports_dtos::CreateReportDto,
            reports_dtos::CreateReportResponseDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::TrackReportResponseDto,
            reports_dtos::UpdateReportStatusDto,
            reports_dtos::ReportSummaryDto,
            ApiResponse<reports_dtos::CreateReportResponseDto>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::TrackReportResponseDto>,
            ApiResponse<reports_dtos::ReportSummaryDto>,
            // Geocoding
            geocoding_dtos::GeocodeResponseDto,
            ApiResponse<geocoding_dtos::GeocodeResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authenticated principal"),
        (name = "reports", description = "Anonymous report submission and tracking (public)"),
        (name = "admin-reports", description = "Report triage (admin or moderator)"),
        (name = "geocoding", description = "Address lookup for the report form (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Incident Report API",
        version = "0.1.0",
        description = "API documentation for anonymous incident reporting",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/me",
            "/api/reports",
            "/api/reports/track/{report_id}",
            "/api/admin/reports",
            "/api/admin/reports/summary",
            "/api/admin/reports/{report_id}",
            "/api/geocode",
            "/api/geocode/reverse",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "Staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.description.as_deref(), Some("Staging"));
    }
}

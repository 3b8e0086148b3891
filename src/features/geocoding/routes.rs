use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::geocoding::handlers;
use crate::modules::geocoding::NominatimClient;

/// Address lookup for the report form (public)
pub fn routes(client: Arc<NominatimClient>) -> Router {
    Router::new()
        .route("/api/geocode", get(handlers::geocode))
        .route("/api/geocode/reverse", get(handlers::reverse_geocode))
        .with_state(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{geocoder_config, spawn_fake_geocoder};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    async fn server() -> TestServer {
        let base_url = spawn_fake_geocoder().await;
        let client = NominatimClient::new(&geocoder_config(&base_url)).unwrap();
        TestServer::new(routes(Arc::new(client))).unwrap()
    }

    #[tokio::test]
    async fn test_forward_lookup() {
        let server = server().await;
        let response = server
            .get("/api/geocode")
            .add_query_param("q", "12 Main Street")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["latitude"], 40.7128);
        assert_eq!(body["data"]["longitude"], -74.006);
        assert_eq!(body["data"]["label"], "Match for 12 Main Street");
    }

    #[tokio::test]
    async fn test_forward_lookup_errors() {
        let server = server().await;

        server
            .get("/api/geocode")
            .add_query_param("q", "nowhere")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .get("/api/geocode")
            .add_query_param("q", "boom")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);

        server
            .get("/api/geocode")
            .add_query_param("q", "   ")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/api/geocode")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let server = server().await;

        let body: Value = server
            .get("/api/geocode/reverse")
            .add_query_param("lat", "1")
            .add_query_param("lon", "2")
            .await
            .json();
        assert_eq!(body["data"]["label"], "Unknown location");
        assert_eq!(body["data"]["latitude"], 1.0);

        server
            .get("/api/geocode/reverse")
            .add_query_param("lat", "0")
            .add_query_param("lon", "0")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .get("/api/geocode/reverse")
            .add_query_param("lat", "91")
            .add_query_param("lon", "0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

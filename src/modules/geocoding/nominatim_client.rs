use serde::Deserialize;

use crate::core::config::GeocoderConfig;
use crate::core::error::{AppError, Result};

const UNKNOWN_LOCATION: &str = "Unknown location";

/// Place returned by the upstream search API
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// `/reverse` answers with a single place, or an error object when nothing is nearby
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(NominatimPlace),
    NotFound {
        #[allow(dead_code)]
        error: String,
    },
}

/// Best match for a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Client for geocoding addresses using Nominatim
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Free-form address search; `None` when nothing matches
    pub async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        // Only the length; queries may be home addresses
        tracing::debug!("Geocoding free-form query ({} chars)", query.len());

        let places: Vec<NominatimPlace> = self.fetch(&url).await?;

        match places.into_iter().next() {
            Some(place) => {
                let (latitude, longitude) = parse_coordinates(&place)?;
                Ok(Some(GeocodedPlace {
                    latitude,
                    longitude,
                    label: label_or_unknown(place.display_name),
                }))
            }
            None => Ok(None),
        }
    }

    /// Address for a coordinate pair. The returned coordinates are the ones asked for.
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<GeocodedPlace>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, latitude, longitude
        );

        match self.fetch::<ReverseResponse>(&url).await? {
            ReverseResponse::Found(place) => Ok(Some(GeocodedPlace {
                latitude,
                longitude,
                label: label_or_unknown(place.display_name),
            })),
            ReverseResponse::NotFound { .. } => Ok(None),
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Geocoder request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Geocoder request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Geocoder returned status: {}", response.status());
            return Err(AppError::ExternalServiceError(format!(
                "Geocoder returned status {}",
                response.status()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse geocoder response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse geocoder response: {}", e))
        })
    }
}

fn parse_coordinates(place: &NominatimPlace) -> Result<(f64, f64)> {
    match (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
        (Ok(lat), Ok(lon)) => Ok((lat, lon)),
        _ => Err(AppError::ExternalServiceError(format!(
            "Geocoder returned malformed coordinates: {}, {}",
            place.lat, place.lon
        ))),
    }
}

fn label_or_unknown(label: Option<String>) -> String {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{geocoder_config, spawn_fake_geocoder};

    async fn client() -> NominatimClient {
        let base_url = spawn_fake_geocoder().await;
        NominatimClient::new(&geocoder_config(&base_url)).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_best_match() {
        let client = client().await;
        let place = client.search("12 Main St & 5th Ave").await.unwrap().unwrap();

        assert_eq!(place.latitude, 40.7128);
        assert_eq!(place.longitude, -74.006);
        // The fake upstream echoes the decoded query
        assert_eq!(place.label, "Match for 12 Main St & 5th Ave");
    }

    #[tokio::test]
    async fn test_search_without_results_is_none() {
        let client = client().await;
        assert_eq!(client.search("nowhere").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_search_upstream_failure_is_external_error() {
        let client = client().await;
        let err = client.search("boom").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_search_malformed_coordinates_is_external_error() {
        let client = client().await;
        let err = client.search("garbled").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[tokio::test]
    async fn test_reverse_keeps_requested_coordinates() {
        let client = client().await;
        let place = client.reverse(51.5, -0.12).await.unwrap().unwrap();

        assert_eq!(place.latitude, 51.5);
        assert_eq!(place.longitude, -0.12);
        assert_eq!(place.label, "10 Downing Street, London");
    }

    #[tokio::test]
    async fn test_reverse_label_falls_back() {
        let client = client().await;
        let place = client.reverse(1.0, 2.0).await.unwrap().unwrap();
        assert_eq!(place.label, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_reverse_nothing_nearby_is_none() {
        let client = client().await;
        assert_eq!(client.reverse(0.0, 0.0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_external_error() {
        // Port 9 (discard) is not listening in the test environment
        let client = NominatimClient::new(&geocoder_config("http://127.0.0.1:9")).unwrap();
        let err = client.search("anything").await.unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[test]
    fn test_label_or_unknown() {
        assert_eq!(label_or_unknown(None), UNKNOWN_LOCATION);
        assert_eq!(label_or_unknown(Some("  ".to_string())), UNKNOWN_LOCATION);
        assert_eq!(label_or_unknown(Some(" Main St ".to_string())), "Main St");
    }
}

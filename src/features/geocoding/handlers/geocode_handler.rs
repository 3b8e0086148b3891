use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::geocoding::dtos::{
    GeocodeQueryParams, GeocodeResponseDto, ReverseGeocodeQueryParams,
};
use crate::modules::geocoding::NominatimClient;
use crate::shared::types::ApiResponse;

/// Coordinates for a typed address
#[utoipa::path(
    get,
    path = "/api/geocode",
    params(GeocodeQueryParams),
    responses(
        (status = 200, description = "Best match", body = ApiResponse<GeocodeResponseDto>),
        (status = 400, description = "Missing or blank query"),
        (status = 404, description = "No location found for the given address"),
        (status = 502, description = "Geocoder unavailable")
    ),
    tag = "geocoding"
)]
pub async fn geocode(
    State(client): State<Arc<NominatimClient>>,
    AppQuery(params): AppQuery<GeocodeQueryParams>,
) -> Result<Json<ApiResponse<GeocodeResponseDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let place = client
        .search(params.q.trim())
        .await?
        .ok_or_else(|| AppError::NotFound("No location found for the given address".to_string()))?;

    Ok(Json(ApiResponse::success(Some(place.into()), None, None)))
}

/// Address for the reporter's current position
#[utoipa::path(
    get,
    path = "/api/geocode/reverse",
    params(ReverseGeocodeQueryParams),
    responses(
        (status = 200, description = "Nearest address", body = ApiResponse<GeocodeResponseDto>),
        (status = 400, description = "Coordinates missing or out of range"),
        (status = 404, description = "No address found for the given coordinates"),
        (status = 502, description = "Geocoder unavailable")
    ),
    tag = "geocoding"
)]
pub async fn reverse_geocode(
    State(client): State<Arc<NominatimClient>>,
    AppQuery(params): AppQuery<ReverseGeocodeQueryParams>,
) -> Result<Json<ApiResponse<GeocodeResponseDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let place = client
        .reverse(params.lat, params.lon)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No address found for the given coordinates".to_string())
        })?;

    Ok(Json(ApiResponse::success(Some(place.into()), None, None)))
}

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::geocoding::GeocodedPlace;
use crate::shared::validation::{not_blank, valid_latitude, valid_longitude};

/// Forward lookup query
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct GeocodeQueryParams {
    /// Free-text address
    #[validate(
        length(min = 1, max = 500, message = "q must be 1-500 characters"),
        custom(function = "not_blank")
    )]
    pub q: String,
}

/// Reverse lookup query
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct ReverseGeocodeQueryParams {
    #[validate(custom(function = "valid_latitude"))]
    pub lat: f64,
    #[validate(custom(function = "valid_longitude"))]
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeocodeResponseDto {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl From<GeocodedPlace> for GeocodeResponseDto {
    fn from(p: GeocodedPlace) -> Self {
        Self {
            latitude: p.latitude,
            longitude: p.longitude,
            label: p.label,
        }
    }
}

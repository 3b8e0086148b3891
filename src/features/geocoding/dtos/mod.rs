pub mod geocode_dto;

pub use geocode_dto::{GeocodeQueryParams, GeocodeResponseDto, ReverseGeocodeQueryParams};

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};

lazy_static! {
    /// Regex for report identifiers: exactly 16 lowercase hex characters
    /// - Valid: "0123456789abcdef", "a1b2c3d4e5f60718"
    /// - Invalid: "ABCDEF0123456789", "abc", "0123456789abcdefg", "0123-456789abcde"
    pub static ref REPORT_ID_REGEX: Regex = Regex::new(r"^[0-9a-f]{16}$").unwrap();
}

/// Reject strings that are empty once surrounding whitespace is removed
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Latitude in degrees, -90..=90
pub fn valid_latitude(value: f64) -> Result<(), validator::ValidationError> {
    in_range(value, 90.0, "latitude", "Latitude must be between -90 and 90")
}

/// Longitude in degrees, -180..=180
pub fn valid_longitude(value: f64) -> Result<(), validator::ValidationError> {
    in_range(value, 180.0, "longitude", "Longitude must be between -180 and 180")
}

/// Query-string filter where `?param=` means "no filter"
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(raw.trim().to_string().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

fn in_range(
    value: f64,
    bound: f64,
    code: &'static str,
    message: &'static str,
) -> Result<(), validator::ValidationError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        return Ok(());
    }
    let mut err = validator::ValidationError::new(code);
    err.message = Some(message.into());
    Err(err)
}

//! Report identifier generation.
//!
//! A report identifier is the first 16 hex characters of
//! `SHA-256("{unix_millis}-{hex(16 random bytes)}")`. It is the only handle a
//! reporter gets back, so it must be unguessable and carry nothing about the
//! submitter.

use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::core::error::AppError;
use crate::shared::constants::{REPORT_ID_ENTROPY_BYTES, REPORT_ID_LEN};
use crate::shared::validation::REPORT_ID_REGEX;

#[derive(Debug, thiserror::Error)]
pub enum ReportIdError {
    #[error("System random source unavailable: {0}")]
    Entropy(#[from] rand::Error),
}

impl From<ReportIdError> for AppError {
    fn from(e: ReportIdError) -> Self {
        tracing::error!("Failed to generate report identifier: {}", e);
        AppError::ServiceUnavailable(
            "Unable to generate a report identifier, please try again".to_string(),
        )
    }
}

/// Generate a fresh report identifier from the current time and OS entropy
pub fn generate_report_id() -> Result<String, ReportIdError> {
    generate_with(&mut OsRng, Utc::now().timestamp_millis())
}

fn generate_with<R: RngCore + ?Sized>(rng: &mut R, millis: i64) -> Result<String, ReportIdError> {
    let mut random = [0u8; REPORT_ID_ENTROPY_BYTES];
    rng.try_fill_bytes(&mut random)?;

    let seed = format!("{}-{}", millis, hex::encode(random));
    let digest = Sha256::digest(seed.as_bytes());

    let mut id = hex::encode(digest);
    id.truncate(REPORT_ID_LEN);
    Ok(id)
}

/// Whether `value` has the shape of a report identifier
pub fn is_valid_report_id(value: &str) -> bool {
    REPORT_ID_REGEX.is_match(value)
}

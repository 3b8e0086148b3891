// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - full access to the triage dashboard
pub const ROLE_ADMIN: &str = "admin";

/// Moderator role - can list reports and change their status
pub const ROLE_MODERATOR: &str = "moderator";

// =============================================================================
// REPORT CONSTANTS
// =============================================================================

/// Length of a report identifier in hex characters
pub const REPORT_ID_LEN: usize = 16;

/// Random bytes mixed into each report identifier
pub const REPORT_ID_ENTROPY_BYTES: usize = 16;

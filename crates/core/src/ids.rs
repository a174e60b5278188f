use uuid::Uuid;

use crate::errors::{CollegeError, CollegeResult};

/// Parses an identifier received as an opaque string.
///
/// A malformed identifier is a validation failure, never a not-found result.
pub fn parse_id(entity: &str, raw: &str) -> CollegeResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| CollegeError::Validation(format!("Invalid {entity} ID: {raw}")))
}

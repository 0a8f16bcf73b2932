//! Request validation helpers shared by the HTTP handlers.
//!
//! The domain trusts its callers, so the range and format checks the
//! upstream request annotations used to provide live here, at the inbound
//! boundary.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;

use crate::domain::Error;

static STREET_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
static WALL_CLOCK_RE: OnceLock<Regex> = OnceLock::new();

fn street_number_regex() -> &'static Regex {
    STREET_NUMBER_RE.get_or_init(|| {
        let pattern = "^[0-9]{1,5}[a-zA-Z]?$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("street number regex failed to compile: {error}"))
    })
}

fn wall_clock_regex() -> &'static Regex {
    WALL_CLOCK_RE.get_or_init(|| {
        let pattern = "^([01][0-9]|2[0-3]):[0-5][0-9]$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("wall clock regex failed to compile: {error}"))
    })
}

/// Reject values that are empty once trimmed of whitespace.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(
            Error::invalid_request(format!("{field} is required")).with_details(json!({
                "field": field,
                "code": "blank",
            })),
        );
    }
    Ok(())
}

/// Street numbers are up to five digits with an optional letter suffix.
pub(crate) fn require_street_number(value: &str) -> Result<(), Error> {
    require_non_blank("streetNumber", value)?;
    if !street_number_regex().is_match(value) {
        return Err(
            Error::invalid_request("invalid street number format").with_details(json!({
                "field": "streetNumber",
                "value": value,
                "code": "invalid_format",
            })),
        );
    }
    Ok(())
}

/// Ratings must fall in the 1–5 star range.
pub(crate) fn require_rating(rating: u8) -> Result<(), Error> {
    if !(1..=5).contains(&rating) {
        return Err(
            Error::invalid_request("rating must be between 1 and 5").with_details(json!({
                "field": "rating",
                "value": rating,
                "code": "out_of_range",
            })),
        );
    }
    Ok(())
}

/// Operating hour entries use 24-hour `HH:MM` wall-clock text.
pub(crate) fn require_wall_clock(field: &str, value: &str) -> Result<(), Error> {
    if !wall_clock_regex().is_match(value) {
        return Err(
            Error::invalid_request(format!("{field} must be a HH:MM time")).with_details(json!({
                "field": field,
                "value": value,
                "code": "invalid_format",
            })),
        );
    }
    Ok(())
}

/// Restaurant submissions must carry at least one photo id.
pub(crate) fn require_photo_ids(photo_ids: &[String]) -> Result<(), Error> {
    if photo_ids.is_empty() {
        return Err(
            Error::invalid_request("at least one photo ID is required").with_details(json!({
                "field": "photoIds",
                "code": "empty",
            })),
        );
    }
    Ok(())
}

//! User-facing guidance for missing or invalid fields.

use raincheck_domain::constants::FORMAT_EXAMPLE;
use raincheck_domain::{CarriedFields, ClarificationRequest, MissingField};

pub const WEATHER_DEGRADED_NOTE: &str =
    "Weather information unavailable - manual weather check recommended";
pub const CALENDAR_DEGRADED_NOTE: &str =
    "Calendar service unavailable - manual conflict check recommended";

pub const fn guidance(field: MissingField) -> &'static str {
    match field {
        MissingField::Time => "Please provide time (e.g., '2pm', '14:00', 'afternoon')",
        MissingField::Location => "Please provide location (e.g., 'Taipei', 'New York')",
        MissingField::Duration => {
            "Please provide duration between 5 and 480 minutes (e.g., '60min', '1 hour')"
        }
    }
}

/// Build the one clarification prompt a request is allowed.
pub fn clarification_request(
    missing: &[MissingField],
    attempt: u32,
    carried: CarriedFields,
) -> ClarificationRequest {
    let lines: Vec<&str> = missing.iter().map(|field| guidance(*field)).collect();
    ClarificationRequest {
        missing: missing.to_vec(),
        message: format!("Additional information needed. {}", lines.join(". ")),
        example: FORMAT_EXAMPLE.to_string(),
        attempt,
        carried,
    }
}

/// Guidance attached to the terminal error once clarification is used up.
pub fn exhausted_guidance() -> String {
    format!("Please send the complete request in one message, for example: \"{FORMAT_EXAMPLE}\"")
}

//! Inbound scheduling requests.

use serde::{Deserialize, Serialize};

use super::summary::ClarificationRequest;

/// Fields recovered from an earlier turn that the user need not repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedFields {
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CarriedFields {
    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty() && self.description.is_none()
    }
}

/// One turn of user input plus the clarification bookkeeping that goes with
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    pub text: String,
    #[serde(default)]
    pub clarification_count: u32,
    #[serde(default)]
    pub carried: CarriedFields,
}

impl SchedulingRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// Answer to a clarification prompt, carrying its count and partial
    /// fields forward.
    pub fn follow_up(text: impl Into<String>, clarification: &ClarificationRequest) -> Self {
        Self {
            text: text.into(),
            clarification_count: clarification.attempt,
            carried: clarification.carried.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MissingField;

    #[test]
    fn follow_up_inherits_count_and_fields() {
        let clarification = ClarificationRequest {
            missing: vec![MissingField::Location],
            message: "Please tell me the city".to_string(),
            example: "Friday 2pm Taipei meet Alice 60min".to_string(),
            attempt: 1,
            carried: CarriedFields {
                attendees: vec!["Alice".to_string()],
                description: Some("coffee".to_string()),
            },
        };

        let request = SchedulingRequest::follow_up("Taipei", &clarification);

        assert_eq!(request.text, "Taipei");
        assert_eq!(request.clarification_count, 1);
        assert_eq!(request.carried.attendees, vec!["Alice".to_string()]);
        assert!(!request.carried.is_empty());
    }

    #[test]
    fn new_request_starts_clean() {
        let request = SchedulingRequest::new("Friday 2pm Taipei");
        assert_eq!(request.clarification_count, 0);
        assert!(request.carried.is_empty());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_LENGTH: usize = 10_000;

/// A poll; only its free-text title is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollData {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollDataRequest {
    pub title: String,
}

impl PollDataRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }

        if self.title.chars().count() > TITLE_MAX_LENGTH {
            return Err(format!("Title cannot exceed {} characters", TITLE_MAX_LENGTH));
        }

        Ok(())
    }

    pub fn get_normalized_title(&self) -> String {
        self.title.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_request_validation() {
        let valid = PollDataRequest {
            title: "Tabs or spaces?".to_string(),
        };
        assert!(valid.validate().is_ok());

        let blank = PollDataRequest {
            title: "  \n ".to_string(),
        };
        assert!(blank.validate().is_err());

        let huge = PollDataRequest {
            title: "x".repeat(TITLE_MAX_LENGTH + 1),
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_poll_request_normalization() {
        let request: PollDataRequest =
            serde_json::from_str(r#"{"title":"  Best pizza topping?  "}"#).expect("Failed to deserialize poll");
        assert_eq!(request.get_normalized_title(), "Best pizza topping?");
    }

    #[test]
    fn test_poll_request_requires_title() {
        assert!(serde_json::from_str::<PollDataRequest>("{}").is_err());
    }
}

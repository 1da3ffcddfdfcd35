use serde::{Deserialize, Serialize};

pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePersonRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CreatePersonRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name("First name", &self.first_name)?;
        validate_name("Last name", &self.last_name)
    }
}

impl UpdatePersonRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.is_none() && self.last_name.is_none() {
            return Err("At least one field (first_name or last_name) must be provided for update".to_string());
        }

        if let Some(ref first_name) = self.first_name {
            validate_name("First name", first_name)?;
        }

        if let Some(ref last_name) = self.last_name {
            validate_name("Last name", last_name)?;
        }

        Ok(())
    }
}

impl From<CreatePersonRequest> for UpdatePersonRequest {
    fn from(request: CreatePersonRequest) -> Self {
        UpdatePersonRequest {
            first_name: Some(request.first_name),
            last_name: Some(request.last_name),
        }
    }
}

fn validate_name(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", label));
    }

    if value.chars().count() > NAME_MAX_LENGTH {
        return Err(format!("{} cannot exceed {} characters", label, NAME_MAX_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_person_request_validation() {
        let valid = CreatePersonRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_last = CreatePersonRequest {
            first_name: "Ada".to_string(),
            last_name: " ".to_string(),
        };
        assert_eq!(missing_last.validate(), Err("Last name cannot be empty".to_string()));
    }

    #[test]
    fn test_update_person_request_validation() {
        assert!(UpdatePersonRequest::default().validate().is_err());

        let rename = UpdatePersonRequest {
            last_name: Some("Byron".to_string()),
            ..Default::default()
        };
        assert!(rename.validate().is_ok());

        let too_long = UpdatePersonRequest {
            first_name: Some("a".repeat(NAME_MAX_LENGTH + 1)),
            ..Default::default()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_full_replace_sets_both_names() {
        let update = UpdatePersonRequest::from(CreatePersonRequest {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        });

        assert_eq!(update.first_name.as_deref(), Some("Grace"));
        assert_eq!(update.last_name.as_deref(), Some("Hopper"));
    }

    #[test]
    fn test_person_serialization() {
        let person = Person {
            id: 4,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };

        let json = serde_json::to_string(&person).expect("Failed to serialize person");
        assert_eq!(json, r#"{"id":4,"first_name":"Ada","last_name":"Lovelace"}"#);
    }
}

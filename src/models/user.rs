use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const USERNAME_MAX_LENGTH: usize = 20;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MAX_LENGTH: usize = 255;
pub const PROFILE_PICTURE_MAX_LENGTH: usize = 255;

/// A registered account of the polling app.
/// `password` is accepted on input but never written back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
}

/// Partial update; fields left out keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_picture: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_username(&self.username)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;

        if let Some(ref picture) = self.profile_picture {
            validate_profile_picture(picture)?;
        }

        Ok(())
    }

    pub fn get_normalized_username(&self) -> String {
        self.username.trim().to_string()
    }

    pub fn get_normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn get_normalized_profile_picture(&self) -> Option<String> {
        normalize_picture(self.profile_picture.as_deref())
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.profile_picture.is_none()
        {
            return Err("At least one field must be provided for update".to_string());
        }

        if let Some(ref username) = self.username {
            validate_username(username)?;
        }

        if let Some(ref email) = self.email {
            validate_email(email)?;
        }

        if let Some(ref password) = self.password {
            validate_password(password)?;
        }

        if let Some(ref picture) = self.profile_picture {
            validate_profile_picture(picture)?;
        }

        Ok(())
    }

    pub fn get_normalized_username(&self) -> Option<String> {
        self.username.as_ref().map(|u| u.trim().to_string())
    }

    pub fn get_normalized_email(&self) -> Option<String> {
        self.email.as_ref().map(|e| e.trim().to_lowercase())
    }

    /// `Some(None)` clears the stored picture (a blank path was sent).
    pub fn get_normalized_profile_picture(&self) -> Option<Option<String>> {
        self.profile_picture
            .as_deref()
            .map(|picture| normalize_picture(Some(picture)))
    }
}

fn validate_username(username: &str) -> Result<(), String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(format!("Username cannot exceed {} characters", USERNAME_MAX_LENGTH));
    }

    // Same character set the usual account validators allow
    if !username.chars().all(|c| c.is_alphanumeric() || "@.+-_".contains(c)) {
        return Err("Username may only contain letters, digits and @/./+/-/_".to_string());
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if email.len() > EMAIL_MAX_LENGTH {
        return Err(format!("Email cannot exceed {} characters", EMAIL_MAX_LENGTH));
    }

    if !is_valid_email(email.trim()) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }

    if password.len() > PASSWORD_MAX_LENGTH {
        return Err(format!("Password cannot exceed {} characters", PASSWORD_MAX_LENGTH));
    }

    Ok(())
}

fn validate_profile_picture(picture: &str) -> Result<(), String> {
    if picture.len() > PROFILE_PICTURE_MAX_LENGTH {
        return Err(format!(
            "Profile picture path cannot exceed {} characters",
            PROFILE_PICTURE_MAX_LENGTH
        ));
    }

    Ok(())
}

fn normalize_picture(picture: Option<&str>) -> Option<String> {
    picture.map(str::trim).filter(|p| !p.is_empty()).map(str::to_string)
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 253 || !domain.contains('.') {
        return false;
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    local.chars().all(|c| c.is_alphanumeric() || ".-_+".contains(c))
        && domain.chars().all(|c| c.is_alphanumeric() || ".-".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            profile_picture: None,
        }
    }

    #[test]
    fn test_create_user_request_validation() {
        assert!(create_request("alice", "alice@example.com").validate().is_ok());

        assert!(create_request("", "alice@example.com").validate().is_err());
        assert!(create_request("alice", "not-an-email").validate().is_err());
        assert!(create_request("has space", "alice@example.com").validate().is_err());
    }

    #[test]
    fn test_username_length_limit() {
        let at_limit = "a".repeat(USERNAME_MAX_LENGTH);
        let over_limit = "a".repeat(USERNAME_MAX_LENGTH + 1);

        assert!(create_request(&at_limit, "alice@example.com").validate().is_ok());
        assert!(create_request(&over_limit, "alice@example.com").validate().is_err());
    }

    #[test]
    fn test_empty_password_rejected() {
        let mut request = create_request("alice", "alice@example.com");
        request.password = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_normalization() {
        let mut request = create_request("  alice ", "  Alice@Example.COM ");
        request.profile_picture = Some("   ".to_string());

        assert_eq!(request.get_normalized_username(), "alice");
        assert_eq!(request.get_normalized_email(), "alice@example.com");
        assert_eq!(request.get_normalized_profile_picture(), None);
    }

    #[test]
    fn test_update_user_request_validation() {
        let empty = UpdateUserRequest::default();
        assert!(empty.validate().is_err());

        let rename = UpdateUserRequest {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        assert!(rename.validate().is_ok());

        let bad_email = UpdateUserRequest {
            email: Some("bob@localhost".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("user+tag@example.org"));

        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_is_not_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
            profile_picture: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).expect("Failed to serialize user");
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["profile_picture"], serde_json::Value::Null);
    }

    #[test]
    fn test_create_user_request_rejects_unknown_fields() {
        let json = r#"{"username":"alice","email":"alice@example.com","password":"x","is_admin":true}"#;
        assert!(serde_json::from_str::<CreateUserRequest>(json).is_err());
    }
}

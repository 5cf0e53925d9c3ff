use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::models::{Account, Role};

use crate::auth::IssuedSession;
use super::{NAME_MAX, within_length};
use crate::utils::error::{ApiError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    /// `guest`, `member` or `admin`.
    pub kind: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedSession> for SessionResponse {
    fn from(issued: IssuedSession) -> Self {
        Self {
            token: issued.token,
            kind: issued.kind.as_str().to_owned(),
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub account: Account,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub pin: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub role: String,
    pub name: String,
    pub username: String,
    pub password: String,
    pub class_section_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub role: Role,
    pub name: String,
    pub username: String,
    pub password: String,
    pub class_section_id: Option<i32>,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewAccount> {
        let role: Role = self.role.trim().parse()?;
        let name = self.name.trim();
        let username = self.username.trim().to_lowercase();

        if name.is_empty() || username.is_empty() || self.password.is_empty() {
            return Err(ApiError::validation(
                "account",
                "Name, username and password are required.",
            ));
        }
        within_length("name", "Name", name, NAME_MAX)?;
        within_length("username", "Username", &username, NAME_MAX)?;

        Ok(NewAccount {
            role,
            name: name.to_owned(),
            username,
            password: self.password,
            class_section_id: self.class_section_id.filter(|_| role == Role::Student),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: &str) -> RegisterRequest {
        RegisterRequest {
            role: role.into(),
            name: " Nadia Islam ".into(),
            username: " Nadia ".into(),
            password: "secret".into(),
            class_section_id: Some(2),
        }
    }

    #[test]
    fn usernames_are_lowercased_and_trimmed() {
        let account = request("student").validate().unwrap();
        assert_eq!(account.username, "nadia");
        assert_eq!(account.name, "Nadia Islam");
        assert_eq!(account.class_section_id, Some(2));
    }

    #[test]
    fn only_students_keep_a_section() {
        assert_eq!(request("teacher").validate().unwrap().class_section_id, None);
    }

    #[test]
    fn invalid_role_or_missing_fields_are_rejected() {
        assert!(request("principal").validate().is_err());

        let mut missing = request("staff");
        missing.password = String::new();
        assert!(missing.validate().is_err());
    }

    #[test]
    fn overlong_usernames_are_rejected() {
        let mut long = request("student");
        long.username = "u".repeat(NAME_MAX + 1);
        let err = long.validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "username"));
    }
}

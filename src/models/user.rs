use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::domain::DomainError;
use crate::entities::users;

/// Role assigned to every newly registered account.
pub const DEFAULT_ROLE: &str = "USER";

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Checks the `local@domain.tld` shape. Deliverability is not checked.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Public projection of a user. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<users::Model> for UserProfile {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
        }
    }
}

/// Returned by `register` and `login`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub review_count: i32,
    pub average_rating: f64,
    /// Most reviewed author. Named after the client-facing field; there is no
    /// genre in the data model.
    pub favorite_genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub review_count: i32,
    pub average_rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() || self.name.is_empty() || self.password.is_empty() {
            return Err(DomainError::validation(
                "Email, name, and password are required",
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "Password must be at least 6 characters long",
            ));
        }

        if !is_valid_email(&self.email) {
            return Err(DomainError::validation(
                "Please provide a valid email address",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("Email and password are required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

impl UpdateProfileInput {
    /// Validates and trims the requested changes.
    ///
    /// Empty strings count as "not provided", the same way the client sends
    /// untouched form fields.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let name = self.name.filter(|n| !n.is_empty());
        let email = self.email.filter(|e| !e.is_empty());
        let new_password = self.new_password.filter(|p| !p.is_empty());

        if name.is_none() && email.is_none() && new_password.is_none() {
            return Err(DomainError::validation(
                "At least one field must be provided for update",
            ));
        }

        let name = match name {
            Some(n) if n.trim().is_empty() => {
                return Err(DomainError::validation("Name cannot be empty"));
            }
            other => other.map(|n| n.trim().to_string()),
        };

        let email = match email {
            Some(e) if e.trim().is_empty() => {
                return Err(DomainError::validation("Email cannot be empty"));
            }
            Some(e) if !is_valid_email(e.trim()) => {
                return Err(DomainError::validation(
                    "Please provide a valid email address",
                ));
            }
            other => other.map(|e| e.trim().to_string()),
        };

        if let Some(p) = &new_password
            && p.chars().count() < MIN_PASSWORD_LEN
        {
            return Err(DomainError::validation(
                "New password must be at least 6 characters long",
            ));
        }

        Ok(Self {
            name,
            email,
            current_password: self.current_password,
            new_password,
        })
    }
}

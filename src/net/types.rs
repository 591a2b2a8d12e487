//! Wire DTOs for the console REST API.
//!
//! DESIGN
//! ======
//! Only the shapes that drive auth and branding state are typed here. Every
//! other resource (certificates, workspaces, notifications) is passed through
//! as `serde_json::Value` and left to the views.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Role string granting access to admin-only routes.
pub const ROLE_ADMIN: &str = "admin";
/// Role reported when no user profile is loaded.
pub const ROLE_USER: &str = "user";

fn default_role() -> String {
    ROLE_USER.to_owned()
}

/// Authenticated user profile as returned by `/auth/login` and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric user identifier.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Optional display name.
    #[serde(default)]
    pub nickname: String,
    /// Contact email, possibly empty.
    #[serde(default)]
    pub email: String,
    /// `admin` or `user`.
    #[serde(default = "default_role")]
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Nickname when set, otherwise the login name.
    pub fn display_name(&self) -> &str {
        if self.nickname.trim().is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}

/// Login form payload for `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

/// Successful login payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds as reported by the server.
    #[serde(default)]
    pub expires_in: i64,
    pub user: User,
}

/// Payload for `POST /auth/change-password`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// Payload for `PUT /auth/profile`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Public branding settings from `GET /settings/site`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

/// Standard response envelope used by every JSON endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Take the `data` member, treating its absence as a decode failure.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the envelope carries no data.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or_else(|| ApiError::Decode { message: "response is missing data".to_owned() })
    }
}

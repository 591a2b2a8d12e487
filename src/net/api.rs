//! REST endpoint bindings.
//!
//! Every call goes through [`ApiClient`], so all of them carry the bearer
//! credential and share its 401 handling. Auth and branding payloads are
//! typed; the remaining resources pass JSON through for the views.

#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::{HttpRequest, Method};
use super::types::{Credentials, LoginResponse, PasswordChange, ProfileUpdate, SiteSettings, User};
use crate::state::session::Authenticator;
use crate::state::site::SiteSource;

/// Archive format accepted by the certificate download endpoint.
pub const DEFAULT_DOWNLOAD_FORMAT: &str = "zip";

fn certificate_path(id: u64) -> String {
    format!("/certificates/{id}")
}

fn workspace_path(id: u64) -> String {
    format!("/workspaces/{id}")
}

fn workspace_member_path(id: u64, user_id: u64) -> String {
    format!("/workspaces/{id}/members/{user_id}")
}

fn user_path(id: u64) -> String {
    format!("/admin/users/{id}")
}

fn notification_path(id: u64) -> String {
    format!("/notifications/{id}")
}

fn with_params(mut request: HttpRequest, params: &[(&str, &str)]) -> HttpRequest {
    for (key, value) in params {
        request = request.with_query(key, *value);
    }
    request
}

/// Query parameters for the certificate download endpoint. The password is
/// only sent when non-empty.
fn download_params<'a>(format: &'a str, password: &'a str) -> Vec<(&'a str, &'a str)> {
    let format = if format.is_empty() { DEFAULT_DOWNLOAD_FORMAT } else { format };
    let mut params = vec![("format", format)];
    if !password.is_empty() {
        params.push(("password", password));
    }
    params
}

impl ApiClient {
    async fn fetch<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        self.send::<T>(request).await?.into_data()
    }

    /// Pass-through payload; an envelope without `data` yields `Value::Null`.
    async fn fetch_value(&self, request: HttpRequest) -> Result<Value, ApiError> {
        Ok(self.send::<Value>(request).await?.data.unwrap_or(Value::Null))
    }

    async fn execute(&self, request: HttpRequest) -> Result<(), ApiError> {
        self.send::<Value>(request).await.map(|_| ())
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.fetch_value(with_params(self.request(Method::Get, path), params)).await
    }

    async fn write_json<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<Value, ApiError> {
        self.fetch_value(self.request(method, path).with_json(body)?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::Delete, path)).await
    }

    // ---------------------------------------------------------------
    // Auth
    // ---------------------------------------------------------------

    /// `POST /auth/login`. Does not touch the session; see
    /// [`SessionState::login`](crate::state::session::SessionState::login).
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.fetch(self.request(Method::Post, "/auth/login").with_json(credentials)?).await
    }

    /// `GET /auth/me`
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(self.request(Method::Get, "/auth/me")).await
    }

    /// `POST /auth/change-password`
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<(), ApiError> {
        let body = PasswordChange { old_password: old_password.to_owned(), new_password: new_password.to_owned() };
        self.execute(self.request(Method::Post, "/auth/change-password").with_json(&body)?).await
    }

    /// `PUT /auth/profile`, returning the refreshed profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.fetch(self.request(Method::Put, "/auth/profile").with_json(update)?).await
    }

    // ---------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------

    /// `GET /settings/site` (public).
    pub async fn site_settings(&self) -> Result<SiteSettings, ApiError> {
        self.fetch(self.request(Method::Get, "/settings/site")).await
    }

    /// `PUT /admin/settings/site`. Absent fields are left unchanged.
    pub async fn update_site_settings(&self, title: Option<&str>, subtitle: Option<&str>) -> Result<SiteSettings, ApiError> {
        let mut body = serde_json::Map::new();
        if let Some(title) = title {
            body.insert("title".to_owned(), json!(title));
        }
        if let Some(subtitle) = subtitle {
            body.insert("subtitle".to_owned(), json!(subtitle));
        }
        self.fetch(self.request(Method::Put, "/admin/settings/site").with_json(&body)?).await
    }

    // ---------------------------------------------------------------
    // Users (admin)
    // ---------------------------------------------------------------

    pub async fn list_users(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.get_json("/admin/users", params).await
    }

    pub async fn get_user(&self, id: u64) -> Result<Value, ApiError> {
        self.get_json(&user_path(id), &[]).await
    }

    pub async fn create_user(&self, user: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/admin/users", user).await
    }

    pub async fn update_user(&self, id: u64, user: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Put, &user_path(id), user).await
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&user_path(id)).await
    }

    pub async fn reset_user_password(&self, id: u64, password: &str) -> Result<(), ApiError> {
        let request = self
            .request(Method::Post, &format!("{}/reset-password", user_path(id)))
            .with_json(&json!({ "password": password }))?;
        self.execute(request).await
    }

    // ---------------------------------------------------------------
    // Certificates
    // ---------------------------------------------------------------

    pub async fn list_certificates(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.get_json("/certificates", params).await
    }

    pub async fn get_certificate(&self, id: u64) -> Result<Value, ApiError> {
        self.get_json(&certificate_path(id), &[]).await
    }

    pub async fn create_certificate(&self, certificate: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/certificates", certificate).await
    }

    pub async fn delete_certificate(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&certificate_path(id)).await
    }

    /// `POST /certificates/{id}/verify`. Runs the ACME challenge round-trip
    /// server-side, so it gets the long verification timeout.
    pub async fn verify_certificate(&self, id: u64) -> Result<Value, ApiError> {
        let request = self
            .request_with_timeout(Method::Post, &format!("{}/verify", certificate_path(id)), self.config().verify_timeout)
            .with_json(&json!({}))?;
        self.fetch_value(request).await
    }

    pub async fn pre_verify_certificate(&self, id: u64) -> Result<Value, ApiError> {
        self.fetch_value(self.request(Method::Post, &format!("{}/pre-verify", certificate_path(id)))).await
    }

    /// `GET /certificates/{id}/download` as raw bytes.
    ///
    /// Bypasses 401 interception: an expired session comes back as
    /// `ApiError::Server { status: 401, .. }` for the caller to handle.
    pub async fn download_certificate(&self, id: u64, format: &str, password: &str) -> Result<Vec<u8>, ApiError> {
        let request = self.request_with_timeout(
            Method::Get,
            &format!("{}/download", certificate_path(id)),
            self.config().download_timeout,
        );
        self.send_raw(with_params(request, &download_params(format, password))).await
    }

    pub async fn certificate_challenges(&self, id: u64) -> Result<Value, ApiError> {
        self.get_json(&format!("{}/challenges", certificate_path(id)), &[]).await
    }

    /// `GET /certificates/{id}/challenges/export` as plain text.
    pub async fn export_challenges(&self, id: u64) -> Result<String, ApiError> {
        self.send_text(self.request(Method::Get, &format!("{}/challenges/export", certificate_path(id))))
            .await
    }

    // ---------------------------------------------------------------
    // Workspaces
    // ---------------------------------------------------------------

    pub async fn list_workspaces(&self) -> Result<Value, ApiError> {
        self.get_json("/workspaces", &[]).await
    }

    pub async fn get_workspace(&self, id: u64) -> Result<Value, ApiError> {
        self.get_json(&workspace_path(id), &[]).await
    }

    pub async fn create_workspace(&self, workspace: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/workspaces", workspace).await
    }

    pub async fn update_workspace(&self, id: u64, workspace: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Put, &workspace_path(id), workspace).await
    }

    pub async fn delete_workspace(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&workspace_path(id)).await
    }

    pub async fn list_workspace_members(&self, id: u64) -> Result<Value, ApiError> {
        self.get_json(&format!("{}/members", workspace_path(id)), &[]).await
    }

    pub async fn add_workspace_member(&self, id: u64, member: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Post, &format!("{}/members", workspace_path(id)), member).await
    }

    pub async fn update_workspace_member(&self, id: u64, user_id: u64, member: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Put, &workspace_member_path(id, user_id), member).await
    }

    pub async fn remove_workspace_member(&self, id: u64, user_id: u64) -> Result<(), ApiError> {
        self.delete(&workspace_member_path(id, user_id)).await
    }

    // ---------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------

    pub async fn list_notifications(&self, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        self.get_json("/notifications", params).await
    }

    pub async fn get_notification(&self, id: u64) -> Result<Value, ApiError> {
        self.get_json(&notification_path(id), &[]).await
    }

    pub async fn create_notification(&self, notification: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/notifications", notification).await
    }

    pub async fn update_notification(&self, id: u64, notification: &Value) -> Result<Value, ApiError> {
        self.write_json(Method::Put, &notification_path(id), notification).await
    }

    pub async fn delete_notification(&self, id: u64) -> Result<(), ApiError> {
        self.delete(&notification_path(id)).await
    }

    /// Send a test message through a notification channel.
    pub async fn test_notification(&self, id: u64) -> Result<(), ApiError> {
        self.execute(self.request(Method::Post, &format!("{}/test", notification_path(id)))).await
    }

    pub async fn notification_logs(&self, certificate_id: u64, limit: u32) -> Result<Value, ApiError> {
        let limit = limit.to_string();
        self.get_json(&format!("{}/notification-logs", certificate_path(certificate_id)), &[("limit", limit.as_str())])
            .await
    }
}

#[async_trait(?Send)]
impl Authenticator for ApiClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.login(credentials).await
    }
}

#[async_trait(?Send)]
impl SiteSource for ApiClient {
    async fn fetch_site(&self) -> Result<SiteSettings, ApiError> {
        self.site_settings().await
    }
}

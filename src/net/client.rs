//! Authorizing API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST call goes through `ApiClient`. Outbound, the session token is
//! attached as a bearer credential. Inbound, a 401 clears the session and
//! forces navigation to the login route before the error is handed back;
//! every other outcome is normalized to either the decoded envelope or an
//! `ApiError` carrying one display message.
//!
//! The download path is the exception: it still authorizes, but returns raw
//! bytes and hands 401 back untouched so the caller decides what to do.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::rc::Rc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::{ApiError, failure_message, status_failed_message};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::ApiResponse;
use crate::config::ApiConfig;
use crate::routes::LOGIN_PATH;
use crate::state::session::SessionState;
use crate::util::navigator::Navigator;

/// Shared handle to the REST API. Cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ApiConfig>,
    transport: Rc<dyn Transport>,
    session: Rc<SessionState>,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        transport: Rc<dyn Transport>,
        session: Rc<SessionState>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self { config: Rc::new(config), transport, session, navigator }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Rc<SessionState> {
        &self.session
    }

    /// Start a request for `path` with the default timeout.
    pub fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, self.config.url(path), self.config.request_timeout)
    }

    /// Start a request for `path` with an explicit timeout.
    pub fn request_with_timeout(&self, method: Method, path: &str, timeout: Duration) -> HttpRequest {
        HttpRequest::new(method, self.config.url(path), timeout)
    }

    /// Attach the bearer credential when a session token is present.
    fn authorize(&self, request: &mut HttpRequest) {
        if request.body.is_some() {
            request.set_header("Content-Type", "application/json");
        }
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
    }

    /// Send an authorized JSON request and decode the response envelope.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] after a 401 (session already cleared and
    ///   navigation to `/login` already forced)
    /// - [`ApiError::Server`] for any other non-2xx status
    /// - [`ApiError::Transport`] when no response arrived
    /// - [`ApiError::Decode`] when a 2xx body is not the expected envelope
    pub async fn send<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<ApiResponse<T>, ApiError> {
        let response = self.exchange(request).await?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode { message: e.to_string() })
    }

    /// Send an authorized request and return the body as text.
    ///
    /// Shares the 401 handling of [`ApiClient::send`].
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`].
    pub async fn send_text(&self, request: HttpRequest) -> Result<String, ApiError> {
        let response = self.exchange(request).await?;
        String::from_utf8(response.body).map_err(|e| ApiError::Decode { message: e.to_string() })
    }

    /// Send an authorized request for a binary payload without 401
    /// interception: an unauthorized download comes back as
    /// `ApiError::Server { status: 401, .. }` and the session is untouched.
    ///
    /// # Errors
    ///
    /// [`ApiError::Server`] for any non-2xx status, [`ApiError::Transport`]
    /// when no response arrived.
    pub async fn send_raw(&self, request: HttpRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.dispatch(request).await?;
        Ok(Self::check_status(response)?.body)
    }

    /// Dispatch with 401 interception and status normalization.
    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.dispatch(request).await?;
        if response.status == 401 {
            let message = failure_message(Some(&response.body), Some(&status_failed_message(401)));
            log::warn!("request unauthorized ({message}); clearing session");
            self.session.logout();
            self.navigator.navigate(LOGIN_PATH);
            return Err(ApiError::Unauthorized { message });
        }
        Self::check_status(response)
    }

    async fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.authorize(&mut request);
        log::debug!("{:?} {}", request.method, request.url);
        self.transport.send(request).await.map_err(|e| {
            let message = failure_message(None, Some(&e.to_string()));
            log::debug!("transport failure: {message}");
            ApiError::Transport { message }
        })
    }

    fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        let message = failure_message(Some(&response.body), Some(&status_failed_message(response.status)));
        log::debug!("request failed with status {}: {message}", response.status);
        Err(ApiError::Server { status: response.status, message })
    }
}

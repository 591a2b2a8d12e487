use std::time::Duration;

use futures::executor::block_on;

use super::*;
use crate::net::testing::{Harness, login_json, user_json};

fn query(request: &HttpRequest) -> Vec<(&str, &str)> {
    request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

// =============================================================
// Paths
// =============================================================

#[test]
fn resource_paths_format_ids() {
    assert_eq!(certificate_path(9), "/certificates/9");
    assert_eq!(workspace_path(2), "/workspaces/2");
    assert_eq!(workspace_member_path(2, 5), "/workspaces/2/members/5");
    assert_eq!(user_path(4), "/admin/users/4");
    assert_eq!(notification_path(3), "/notifications/3");
}

#[test]
fn download_params_default_format_and_optional_password() {
    assert_eq!(download_params("", ""), vec![("format", "zip")]);
    assert_eq!(download_params("pem", "s3cret"), vec![("format", "pem"), ("password", "s3cret")]);
}

// =============================================================
// Auth
// =============================================================

#[test]
fn login_posts_credentials() {
    let h = Harness::new();
    h.transport.reply_ok(login_json("tok", "admin"));

    let resp = block_on(h.client.login(&Credentials::new("admin", "admin123"))).unwrap();

    assert_eq!(resp.token, "tok");
    let request = h.transport.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/api/v1/auth/login");
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"username": "admin", "password": "admin123"}));
}

#[test]
fn login_alone_does_not_touch_session() {
    let h = Harness::new();
    h.transport.reply_ok(login_json("tok", "user"));
    block_on(h.client.login(&Credentials::new("alice", "pw"))).unwrap();
    assert!(!h.session.is_authenticated());
}

#[test]
fn current_user_decodes_profile() {
    let h = Harness::new();
    h.transport.reply_ok(user_json("admin"));
    let user = block_on(h.client.current_user()).unwrap();
    assert!(user.is_admin());
    assert_eq!(h.transport.last_request().url, "/api/v1/auth/me");
}

#[test]
fn change_password_sends_snake_case_body() {
    let h = Harness::new();
    h.transport.reply(200, &json!({"code": 0, "message": "password changed successfully"}));
    block_on(h.client.change_password("old", "newpass")).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/auth/change-password");
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"old_password": "old", "new_password": "newpass"}));
}

#[test]
fn update_profile_puts_and_returns_user() {
    let h = Harness::new();
    h.transport.reply_ok(user_json("user"));
    let update = ProfileUpdate { nickname: Some("Alice".to_owned()), email: None };
    let user = block_on(h.client.update_profile(&update)).unwrap();
    assert_eq!(user.nickname, "Alice");
    assert_eq!(h.transport.last_request().method, Method::Put);
}

// =============================================================
// Settings
// =============================================================

#[test]
fn site_settings_hits_public_endpoint() {
    let h = Harness::new();
    h.transport.reply_ok(json!({"title": "Certs", "subtitle": "PKI"}));
    let site = block_on(h.client.site_settings()).unwrap();
    assert_eq!(site.subtitle, "PKI");
    assert_eq!(h.transport.last_request().url, "/api/v1/settings/site");
}

#[test]
fn update_site_settings_sends_only_given_fields() {
    let h = Harness::new();
    h.transport.reply_ok(json!({"title": "Certs", "subtitle": ""}));
    block_on(h.client.update_site_settings(Some("Certs"), None)).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/admin/settings/site");
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"title": "Certs"}));
}

// =============================================================
// Certificates
// =============================================================

#[test]
fn list_certificates_passes_query_params() {
    let h = Harness::new();
    h.transport.reply_ok(json!({"items": [], "total": 0}));
    block_on(h.client.list_certificates(&[("page", "2"), ("page_size", "20")])).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/certificates");
    assert_eq!(query(&request), vec![("page", "2"), ("page_size", "20")]);
}

#[test]
fn verify_uses_long_timeout() {
    let h = Harness::new();
    h.transport.reply_ok(json!({"status": "valid"}));
    block_on(h.client.verify_certificate(5)).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/certificates/5/verify");
    assert_eq!(request.timeout, Duration::from_secs(120));
    assert_eq!(request.body.as_deref(), Some("{}"));
}

#[test]
fn download_uses_download_timeout_and_params() {
    let h = Harness::new();
    h.transport.reply_bytes(200, b"PK");
    let bytes = block_on(h.client.download_certificate(5, "pfx", "pw")).unwrap();
    assert_eq!(bytes, b"PK".to_vec());
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/certificates/5/download");
    assert_eq!(request.timeout, Duration::from_secs(30));
    assert_eq!(query(&request), vec![("format", "pfx"), ("password", "pw")]);
}

#[test]
fn export_challenges_returns_text() {
    let h = Harness::new();
    h.transport.reply_bytes(200, b"_acme-challenge.example.com TXT abc");
    let text = block_on(h.client.export_challenges(5)).unwrap();
    assert_eq!(text, "_acme-challenge.example.com TXT abc");
}

#[test]
fn delete_accepts_envelope_without_data() {
    let h = Harness::new();
    h.transport.reply(200, &json!({"code": 0, "message": "deleted"}));
    block_on(h.client.delete_certificate(5)).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url, "/api/v1/certificates/5");
}

#[test]
fn pass_through_endpoint_without_data_yields_null() {
    let h = Harness::new();
    h.transport.reply(200, &json!({"code": 0, "message": "ok"}));
    assert_eq!(block_on(h.client.pre_verify_certificate(5)).unwrap(), Value::Null);
}

// =============================================================
// Workspaces, users, notifications
// =============================================================

#[test]
fn workspace_member_routes() {
    let h = Harness::new();
    h.transport.reply_ok(json!({"role": "editor"}));
    h.transport.reply(200, &json!({"code": 0, "message": "removed"}));

    block_on(h.client.update_workspace_member(2, 5, &json!({"role": "editor"}))).unwrap();
    block_on(h.client.remove_workspace_member(2, 5)).unwrap();

    let requests = h.transport.requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].url, "/api/v1/workspaces/2/members/5");
    assert_eq!(requests[1].method, Method::Delete);
}

#[test]
fn reset_user_password_posts_password() {
    let h = Harness::new();
    h.transport.reply(200, &json!({"code": 0, "message": "ok"}));
    block_on(h.client.reset_user_password(4, "temp-pass")).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/admin/users/4/reset-password");
    assert_eq!(request.body.as_deref(), Some(r#"{"password":"temp-pass"}"#));
}

#[test]
fn notification_logs_pass_limit() {
    let h = Harness::new();
    h.transport.reply_ok(json!([]));
    block_on(h.client.notification_logs(7, 50)).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/certificates/7/notification-logs");
    assert_eq!(query(&request), vec![("limit", "50")]);
}

#[test]
fn test_notification_posts_without_body() {
    let h = Harness::new();
    h.transport.reply(200, &json!({"code": 0, "message": "sent"}));
    block_on(h.client.test_notification(3)).unwrap();
    let request = h.transport.last_request();
    assert_eq!(request.url, "/api/v1/notifications/3/test");
    assert!(request.body.is_none());
}

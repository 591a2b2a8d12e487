use super::*;

#[test]
fn user_role_defaults_to_user_when_missing() {
    let user: User = serde_json::from_str(r#"{"id":7,"username":"ops"}"#).unwrap();
    assert_eq!(user.role, ROLE_USER);
    assert!(user.nickname.is_empty());
    assert!(!user.is_admin());
}

#[test]
fn user_is_admin_only_for_admin_role() {
    let user: User = serde_json::from_str(r#"{"id":1,"username":"admin","role":"admin"}"#).unwrap();
    assert!(user.is_admin());
}

#[test]
fn display_name_prefers_nickname() {
    let mut user: User = serde_json::from_str(r#"{"id":1,"username":"admin","nickname":"Administrator"}"#).unwrap();
    assert_eq!(user.display_name(), "Administrator");
    user.nickname = "  ".to_owned();
    assert_eq!(user.display_name(), "admin");
}

#[test]
fn login_response_parses_server_payload() {
    let raw = r#"{"token":"t-1","expires_in":86400,"user":{"id":1,"username":"admin","nickname":"Administrator","email":"","role":"admin"}}"#;
    let resp: LoginResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.token, "t-1");
    assert_eq!(resp.expires_in, 86400);
    assert!(resp.user.is_admin());
}

#[test]
fn profile_update_skips_absent_fields() {
    let update = ProfileUpdate { nickname: Some("Ops".to_owned()), email: None };
    assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"nickname":"Ops"}"#);
}

#[test]
fn password_change_uses_snake_case_fields() {
    let body = PasswordChange { old_password: "a".to_owned(), new_password: "b".to_owned() };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({"old_password": "a", "new_password": "b"})
    );
}

#[test]
fn envelope_without_data_is_decode_error() {
    let resp: ApiResponse<SiteSettings> = serde_json::from_str(r#"{"code":0,"message":"success"}"#).unwrap();
    assert!(matches!(resp.into_data(), Err(ApiError::Decode { .. })));
}

#[test]
fn envelope_with_data_yields_payload() {
    let resp: ApiResponse<SiteSettings> =
        serde_json::from_str(r#"{"code":0,"message":"success","data":{"title":"Certs"}}"#).unwrap();
    let site = resp.into_data().unwrap();
    assert_eq!(site.title, "Certs");
    assert_eq!(site.subtitle, "");
}

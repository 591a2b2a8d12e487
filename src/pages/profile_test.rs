use super::*;

fn alice() -> User {
    serde_json::from_value(serde_json::json!({
        "id": 1,
        "username": "alice",
        "nickname": "Alice",
        "email": "alice@example.com",
        "role": "user"
    }))
    .unwrap()
}

#[test]
fn profile_update_sends_only_changed_fields() {
    let user = alice();
    assert_eq!(
        profile_update(Some(&user), "Ally", "alice@example.com"),
        Some(ProfileUpdate { nickname: Some("Ally".to_owned()), email: None })
    );
}

#[test]
fn profile_update_is_none_when_nothing_changed() {
    let user = alice();
    assert_eq!(profile_update(Some(&user), " Alice ", "alice@example.com"), None);
    assert_eq!(profile_update(Some(&user), "", "   "), None);
}

#[test]
fn profile_update_without_cached_user_sends_filled_fields() {
    assert_eq!(
        profile_update(None, "Alice", ""),
        Some(ProfileUpdate { nickname: Some("Alice".to_owned()), email: None })
    );
}

#[test]
fn validate_password_change_requires_both_and_min_length() {
    assert_eq!(validate_password_change("", "newpass"), Err("Enter both the current and the new password."));
    assert_eq!(validate_password_change("old", "short"), Err("New password must be at least 6 characters."));
    assert_eq!(validate_password_change("old", "newpass"), Ok(()));
}

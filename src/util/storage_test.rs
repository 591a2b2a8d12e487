use super::*;

fn sample_user() -> User {
    User {
        id: 3,
        username: "ops".to_owned(),
        nickname: "Ops".to_owned(),
        email: "ops@example.com".to_owned(),
        role: "user".to_owned(),
    }
}

fn store_over(memory: &Rc<MemoryStorage>) -> CredentialStore {
    CredentialStore::new(memory.clone())
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_set_get_remove() {
    let memory = MemoryStorage::new();
    assert_eq!(memory.get("k"), None);
    memory.set("k", "v");
    assert_eq!(memory.get("k").as_deref(), Some("v"));
    memory.remove("k");
    assert!(!memory.contains("k"));
}

// =============================================================
// CredentialStore
// =============================================================

#[test]
fn load_from_empty_storage_is_absent() {
    let memory = Rc::new(MemoryStorage::new());
    assert_eq!(store_over(&memory).load(), PersistedCredentials::default());
}

#[test]
fn save_then_load_restores_both_entries() {
    let memory = Rc::new(MemoryStorage::new());
    let store = store_over(&memory);
    store.save("tok", &sample_user());

    assert_eq!(memory.get(TOKEN_KEY).as_deref(), Some("tok"));
    let loaded = store.load();
    assert_eq!(loaded.token.as_deref(), Some("tok"));
    assert_eq!(loaded.user, Some(sample_user()));
}

#[test]
fn malformed_user_entry_loads_as_absent() {
    let memory = Rc::new(MemoryStorage::with_entries([(TOKEN_KEY, "tok"), (USER_KEY, "{not json")]));
    let loaded = store_over(&memory).load();
    assert_eq!(loaded.token.as_deref(), Some("tok"));
    assert!(loaded.user.is_none());
    assert!(loaded.user_malformed);
}

#[test]
fn null_user_entry_loads_as_absent() {
    let memory = Rc::new(MemoryStorage::with_entries([(USER_KEY, "null")]));
    let loaded = store_over(&memory).load();
    assert!(loaded.user.is_none());
    assert!(!loaded.user_malformed);
}

#[test]
fn empty_token_entry_loads_as_absent() {
    let memory = Rc::new(MemoryStorage::with_entries([(TOKEN_KEY, "")]));
    assert!(store_over(&memory).load().token.is_none());
}

#[test]
fn save_user_leaves_token_untouched() {
    let memory = Rc::new(MemoryStorage::with_entries([(TOKEN_KEY, "tok")]));
    store_over(&memory).save_user(&sample_user());
    assert_eq!(memory.get(TOKEN_KEY).as_deref(), Some("tok"));
    assert!(memory.contains(USER_KEY));
}

#[test]
fn clear_removes_both_entries() {
    let memory = Rc::new(MemoryStorage::new());
    let store = store_over(&memory);
    store.save("tok", &sample_user());
    store.clear();
    assert!(!memory.contains(TOKEN_KEY));
    assert!(!memory.contains(USER_KEY));
}

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::warn;

use crate::models::User;

pub const USER_KEY: &str = "user";
pub const PENDING_CODE_KEY: &str = "pendingSessionCode";

/// String key/value persistence that outlives a page, like browser local storage.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

pub fn load_user(storage: &dyn LocalStorage) -> Option<User> {
    let raw = storage.get(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("discarding unreadable stored user: {}", e);
            storage.remove(USER_KEY);
            None
        }
    }
}

pub fn save_user(storage: &dyn LocalStorage, user: &User) {
    match serde_json::to_string(user) {
        Ok(raw) => storage.set(USER_KEY, &raw),
        Err(e) => warn!("failed to persist user: {}", e),
    }
}

pub fn clear_user(storage: &dyn LocalStorage) {
    storage.remove(USER_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn garbage_user_entry_is_dropped() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{not json");
        assert!(load_user(&storage).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn user_survives_save_and_load() {
        let storage = MemoryStorage::new();
        let user = User {
            id: 3,
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            role: Role::Trainer,
            dob: None,
        };
        save_user(&storage, &user);
        assert_eq!(load_user(&storage), Some(user));
    }
}

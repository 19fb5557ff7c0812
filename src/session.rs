//! Durable session persistence: the access/refresh token pair and the cached
//! user record, stored under fixed keys so a page reload restores the
//! signed-in state.

use crate::api::{ApiError, UserRecord};
use crate::utils::storage;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Whatever subset of the session is currently persisted. Absent fields are
/// "not authenticated" inputs to startup logic, not errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserRecord>,
}

/// Writes all three session fields. A failure on any write rolls the store
/// back to empty rather than leaving a partial session behind.
pub fn save_session(
    access_token: &str,
    refresh_token: &str,
    user: &UserRecord,
) -> Result<(), ApiError> {
    let result = write_all(access_token, refresh_token, user);
    if result.is_err() {
        clear_session();
    }
    result
}

fn write_all(access_token: &str, refresh_token: &str, user: &UserRecord) -> Result<(), ApiError> {
    storage::set_item(ACCESS_TOKEN_KEY, access_token).map_err(ApiError::Storage)?;
    storage::set_item(REFRESH_TOKEN_KEY, refresh_token).map_err(ApiError::Storage)?;
    let user_json = serde_json::to_string(user).map_err(|e| ApiError::Storage(e.to_string()))?;
    storage::set_item(USER_KEY, &user_json).map_err(ApiError::Storage)
}

/// Replaces the token pair, leaving the cached user record untouched.
pub fn store_tokens(access_token: &str, refresh_token: &str) -> Result<(), ApiError> {
    storage::set_item(ACCESS_TOKEN_KEY, access_token).map_err(ApiError::Storage)?;
    storage::set_item(REFRESH_TOKEN_KEY, refresh_token).map_err(ApiError::Storage)
}

pub fn store_user(user: &UserRecord) -> Result<(), ApiError> {
    let user_json = serde_json::to_string(user).map_err(|e| ApiError::Storage(e.to_string()))?;
    storage::set_item(USER_KEY, &user_json).map_err(ApiError::Storage)
}

/// Loads whatever is persisted. A stored user record that no longer parses
/// counts as corrupt credentials: the whole store is cleared and the caller
/// sees an empty session.
pub fn load_session() -> StoredSession {
    let access_token = storage::get_item(ACCESS_TOKEN_KEY);
    let refresh_token = storage::get_item(REFRESH_TOKEN_KEY);
    let user = match storage::get_item(USER_KEY) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("discarding corrupt stored user record: {err}");
                clear_session();
                return StoredSession::default();
            }
        },
        None => None,
    };
    StoredSession {
        access_token,
        refresh_token,
        user,
    }
}

pub fn access_token() -> Option<String> {
    storage::get_item(ACCESS_TOKEN_KEY)
}

pub fn refresh_token() -> Option<String> {
    storage::get_item(REFRESH_TOKEN_KEY)
}

/// Removes all three fields unconditionally; succeeds even when some are
/// already absent.
pub fn clear_session() {
    storage::remove_item(ACCESS_TOKEN_KEY);
    storage::remove_item(REFRESH_TOKEN_KEY);
    storage::remove_item(USER_KEY);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn sample_user() -> UserRecord {
        UserRecord {
            id: "u1".into(),
            full_name: "Alice Example".into(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            avatar: None,
            cover_image: None,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        clear_session();
        save_session("T1", "R1", &sample_user()).unwrap();
        let stored = load_session();
        assert_eq!(stored.access_token.as_deref(), Some("T1"));
        assert_eq!(stored.refresh_token.as_deref(), Some("R1"));
        assert_eq!(stored.user.unwrap().username, "alice");
    }

    #[test]
    fn clear_is_unconditional_and_idempotent() {
        save_session("T1", "R1", &sample_user()).unwrap();
        clear_session();
        clear_session();
        assert_eq!(load_session(), StoredSession::default());
    }

    #[test]
    fn corrupt_user_record_empties_the_store() {
        store_tokens("T1", "R1").unwrap();
        crate::utils::storage::set_item(USER_KEY, "{not json").unwrap();
        assert_eq!(load_session(), StoredSession::default());
        assert!(access_token().is_none());
        assert!(refresh_token().is_none());
    }

    #[test]
    fn store_tokens_preserves_the_cached_user() {
        clear_session();
        save_session("T1", "R1", &sample_user()).unwrap();
        store_tokens("T2", "R2").unwrap();
        let stored = load_session();
        assert_eq!(stored.access_token.as_deref(), Some("T2"));
        assert_eq!(stored.user.unwrap().id, "u1");
    }
}

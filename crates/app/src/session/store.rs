//! Session persistence.

use std::sync::Arc;

use comanda::users::User;
use tracing::warn;

use crate::{
    session::Session,
    storage::{KeyValueStore, StorageError},
};

/// Storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key for the signed in user.
pub const USER_KEY: &str = "user";

/// Keeps the session across runs. Like the cart adapter it never fails:
/// unreadable data means "signed out".
#[derive(Debug, Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Session {
        match self.try_load() {
            Ok(Some(session)) => session,
            Ok(None) => Session::anonymous(),
            Err(error) => {
                warn!(%error, "discarding stored session");
                Session::anonymous()
            }
        }
    }

    /// Stores the token and user together. If either write fails both keys
    /// are cleared so a token is never left paired with another user.
    pub fn save(&self, session: &Session) {
        if let Err(error) = self.try_save(session) {
            warn!(%error, "failed to store session");
            self.clear();
        }
    }

    pub fn clear(&self) {
        for key in [AUTH_TOKEN_KEY, USER_KEY] {
            if let Err(error) = self.store.remove(key) {
                warn!(%error, key, "failed to clear session key");
            }
        }
    }

    fn try_load(&self) -> Result<Option<Session>, SessionStoreError> {
        let Some(token) = self.store.get(AUTH_TOKEN_KEY)? else {
            return Ok(None);
        };

        let Some(user) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };

        let user: User = serde_json::from_str(&user)?;

        Ok(Some(Session::signed_in(token, user)))
    }

    fn try_save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let (Some(token), Some(user)) = (session.token(), session.user()) else {
            self.clear();
            return Ok(());
        };

        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        self.store.set(AUTH_TOKEN_KEY, token)?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
enum SessionStoreError {
    #[error("storage error")]
    Storage(#[from] StorageError),

    #[error("invalid stored user")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        session::fixtures::customer,
        storage::{MemoryStore, MockKeyValueStore},
    };

    use super::*;

    #[test]
    fn round_trips_a_signed_in_session() {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        let session = customer();

        sessions.save(&session);

        assert_eq!(sessions.load(), session);
    }

    #[test]
    fn corrupt_user_loads_as_anonymous() -> TestResult {
        let store = MemoryStore::new();
        store.set(AUTH_TOKEN_KEY, "abc")?;
        store.set(USER_KEY, "{not json")?;

        let sessions = SessionStore::new(Arc::new(store));

        assert!(!sessions.load().is_signed_in());

        Ok(())
    }

    #[test]
    fn saving_anonymous_clears_keys() -> TestResult {
        let store = MemoryStore::new();
        let sessions = SessionStore::new(Arc::new(store.clone()));

        sessions.save(&customer());
        sessions.save(&Session::anonymous());

        assert_eq!(store.get(AUTH_TOKEN_KEY)?, None);
        assert_eq!(store.get(USER_KEY)?, None);

        Ok(())
    }

    #[test]
    fn failed_token_write_clears_both_keys() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .withf(|key, _| key == USER_KEY)
            .once()
            .returning(|_, _| Ok(()));
        store
            .expect_set()
            .withf(|key, _| key == AUTH_TOKEN_KEY)
            .once()
            .returning(|_, _| Err(StorageError::Unavailable("quota exceeded".to_string())));
        store
            .expect_remove()
            .withf(|key| key == AUTH_TOKEN_KEY)
            .once()
            .returning(|_| Ok(()));
        store
            .expect_remove()
            .withf(|key| key == USER_KEY)
            .once()
            .returning(|_| Ok(()));

        SessionStore::new(Arc::new(store)).save(&customer());
    }

    #[test]
    fn failed_user_write_leaves_no_stale_token() -> TestResult {
        let store = MemoryStore::new();
        store.set(AUTH_TOKEN_KEY, "old-token")?;

        let mut failing = MockKeyValueStore::new();
        failing
            .expect_set()
            .returning(|_, _| Err(StorageError::Unavailable("disk full".to_string())));
        let inner = store.clone();
        failing
            .expect_remove()
            .returning(move |key| inner.remove(key));

        SessionStore::new(Arc::new(failing)).save(&customer());

        assert_eq!(store.get(AUTH_TOKEN_KEY)?, None);
        assert_eq!(store.get(USER_KEY)?, None);

        Ok(())
    }
}

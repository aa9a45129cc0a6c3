//! Session lifecycle.
//!
//! One [`SessionManager`] is created at start-up and handed to whatever needs
//! an access token. It loads a persisted session in [`SessionManager::init`],
//! refreshes the token shortly before it expires, and forgets everything on
//! [`SessionManager::clear`].

mod store;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::session::{AuthTokens, Session};
use crate::services::api::ApiError;

/// Refresh this long before the recorded expiry
const REFRESH_MARGIN_SECS: i64 = 60;

#[cfg_attr(test, mockall::automock)]
pub trait TokenRefresher {
    fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ApiError>;
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("session expired")]
    Expired,

    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] ApiError),
}

/// Token status of the signed-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Valid(String),
    /// Holds the refresh token to exchange
    NeedsRefresh(String),
}

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Load the persisted session, if any
    pub fn init(&mut self) -> Option<&Session> {
        match self.store.load() {
            Ok(Some(session)) => {
                log::info!("Restored session for {}", session.user.email);
                self.current = Some(session);
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Failed to restore session: {:#}", e);
                self.current = None;
            }
        }
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(Session::is_admin)
    }

    pub fn login(&mut self, session: Session) {
        log::info!("Signed in as {} ({:?})", session.user.email, session.user.role);
        self.persist(&session);
        self.current = Some(session);
    }

    /// Forget the session in memory and in the store
    pub fn clear(&mut self) {
        if let Some(session) = self.current.take() {
            log::info!("Signed out {}", session.user.email);
        }
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear stored session: {:#}", e);
        }
    }

    /// What a request needs before it can go out: the current access token,
    /// or a refresh first when the token is about to expire.
    ///
    /// An expired session without a refresh token is cleared here.
    pub fn token_state(&mut self, now: DateTime<Utc>) -> Result<TokenState, SessionError> {
        let session = self.current.as_ref().ok_or(SessionError::NotSignedIn)?;
        if !session
            .tokens
            .expires_within(now, Duration::seconds(REFRESH_MARGIN_SECS))
        {
            return Ok(TokenState::Valid(session.tokens.access_token.clone()));
        }

        if session.tokens.refresh_token.is_empty() {
            self.clear();
            return Err(SessionError::Expired);
        }
        Ok(TokenState::NeedsRefresh(session.tokens.refresh_token.clone()))
    }

    /// Record the outcome of a token refresh and return the new access token.
    ///
    /// A failed refresh signs the user out.
    pub fn apply_refresh(&mut self, result: Result<AuthTokens, ApiError>) -> Result<String, SessionError> {
        let session = self.current.as_ref().ok_or(SessionError::NotSignedIn)?;
        match result {
            Ok(tokens) => {
                let mut refreshed = session.clone();
                refreshed.tokens = tokens;
                let token = refreshed.tokens.access_token.clone();
                self.persist(&refreshed);
                self.current = Some(refreshed);
                Ok(token)
            }
            Err(e) => {
                log::warn!("Token refresh failed: {}", e);
                self.clear();
                Err(SessionError::RefreshFailed(e))
            }
        }
    }

    /// A usable access token, refreshing it in place when it is about to expire
    pub fn access_token<R>(&mut self, refresher: &R, now: DateTime<Utc>) -> Result<String, SessionError>
    where
        R: TokenRefresher + ?Sized,
    {
        match self.token_state(now)? {
            TokenState::Valid(token) => Ok(token),
            TokenState::NeedsRefresh(refresh_token) => {
                log::debug!("Access token expiring, refreshing");
                let result = refresher.refresh(&refresh_token);
                self.apply_refresh(result)
            }
        }
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(session) {
            log::warn!("Failed to persist session: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{Role, SessionUser};
    use tempfile::tempdir;

    fn session(expires_at: DateTime<Utc>, refresh_token: &str) -> Session {
        Session {
            user: SessionUser {
                id: "u1".to_string(),
                email: "planner@example.com".to_string(),
                name: "Planner".to_string(),
                role: Role::Admin,
            },
            tokens: AuthTokens {
                access_token: "access-1".to_string(),
                refresh_token: refresh_token.to_string(),
                expires_at,
            },
        }
    }

    fn fresh_tokens(now: DateTime<Utc>) -> AuthTokens {
        AuthTokens {
            access_token: "access-2".to_string(),
            refresh_token: "refresh-2".to_string(),
            expires_at: now + Duration::hours(1),
        }
    }

    #[test]
    fn test_init_restores_persisted_session() {
        let store = MemorySessionStore::new();
        let now = Utc::now();
        store.save(&session(now + Duration::hours(1), "r")).unwrap();

        let mut manager = SessionManager::new(Box::new(store));
        assert!(manager.init().is_some());
        assert!(manager.is_admin());
    }

    #[test]
    fn test_access_token_without_session() {
        let mut manager = SessionManager::new(Box::new(MemorySessionStore::new()));
        let refresher = MockTokenRefresher::new();
        let result = manager.access_token(&refresher, Utc::now());
        assert!(matches!(result, Err(SessionError::NotSignedIn)));
    }

    #[test]
    fn test_valid_token_not_refreshed() {
        let now = Utc::now();
        let mut manager = SessionManager::new(Box::new(MemorySessionStore::new()));
        manager.login(session(now + Duration::hours(1), "refresh-1"));

        let mut refresher = MockTokenRefresher::new();
        refresher.expect_refresh().never();

        assert_eq!(manager.access_token(&refresher, now).unwrap(), "access-1");
    }

    #[test]
    fn test_expiring_token_refreshed_and_persisted() {
        let now = Utc::now();
        let store = MemorySessionStore::new();
        let mut manager = SessionManager::new(Box::new(store.clone()));
        manager.login(session(now + Duration::seconds(30), "refresh-1"));

        let mut refresher = MockTokenRefresher::new();
        refresher
            .expect_refresh()
            .withf(|token| token == "refresh-1")
            .times(1)
            .returning(move |_| Ok(fresh_tokens(now)));

        assert_eq!(manager.access_token(&refresher, now).unwrap(), "access-2");
        assert_eq!(store.snapshot().unwrap().tokens.refresh_token, "refresh-2");
    }

    #[test]
    fn test_failed_refresh_signs_out() {
        let now = Utc::now();
        let store = MemorySessionStore::new();
        let mut manager = SessionManager::new(Box::new(store.clone()));
        manager.login(session(now - Duration::minutes(5), "refresh-1"));

        let mut refresher = MockTokenRefresher::new();
        refresher
            .expect_refresh()
            .returning(|_| Err(ApiError::Unauthorized));

        let result = manager.access_token(&refresher, now);
        assert!(matches!(result, Err(SessionError::RefreshFailed(ApiError::Unauthorized))));
        assert!(!manager.is_signed_in());
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn test_expired_without_refresh_token() {
        let now = Utc::now();
        let mut manager = SessionManager::new(Box::new(MemorySessionStore::new()));
        manager.login(session(now - Duration::minutes(5), ""));

        let refresher = MockTokenRefresher::new();
        assert!(matches!(
            manager.access_token(&refresher, now),
            Err(SessionError::Expired)
        ));
        assert!(!manager.is_signed_in());
    }

    #[test]
    fn test_token_state_asks_for_refresh_near_expiry() {
        let now = Utc::now();
        let mut manager = SessionManager::new(Box::new(MemorySessionStore::new()));
        manager.login(session(now + Duration::hours(1), "refresh-1"));
        assert_eq!(
            manager.token_state(now).unwrap(),
            TokenState::Valid("access-1".to_string())
        );

        let later = now + Duration::minutes(59) + Duration::seconds(30);
        assert_eq!(
            manager.token_state(later).unwrap(),
            TokenState::NeedsRefresh("refresh-1".to_string())
        );
        // Asking does not change the session
        assert_eq!(manager.current().unwrap().tokens.access_token, "access-1");
    }

    #[test]
    fn test_apply_refresh_from_another_thread() {
        let now = Utc::now();
        let store = MemorySessionStore::new();
        let mut manager = SessionManager::new(Box::new(store.clone()));
        manager.login(session(now - Duration::minutes(1), "refresh-1"));

        let TokenState::NeedsRefresh(refresh_token) = manager.token_state(now).unwrap() else {
            panic!("expected a refresh");
        };
        let result = std::thread::spawn(move || {
            assert_eq!(refresh_token, "refresh-1");
            Ok(fresh_tokens(now))
        })
        .join()
        .unwrap();

        assert_eq!(manager.apply_refresh(result).unwrap(), "access-2");
        assert_eq!(store.snapshot().unwrap().tokens.access_token, "access-2");
        assert_eq!(
            manager.token_state(now).unwrap(),
            TokenState::Valid("access-2".to_string())
        );
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let now = Utc::now();

        {
            let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
            manager.login(session(now + Duration::hours(1), "refresh-1"));
        }
        assert!(path.exists());

        let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
        let restored = manager.init().cloned().unwrap();
        assert_eq!(restored.user.email, "planner@example.com");

        manager.clear();
        assert!(!path.exists());
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ nope").unwrap();

        let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
        assert!(manager.init().is_none());
    }
}

// Integration tests for settings and session persistence
use chrono::{Duration, Utc};
use tempfile::tempdir;
use wedding_booking::models::session::{AuthTokens, Role, Session, SessionUser};
use wedding_booking::models::settings::{InvalidIntervalPolicy, Settings};
use wedding_booking::services::api::ApiError;
use wedding_booking::services::session::{
    FileSessionStore, SessionError, SessionManager, TokenRefresher,
};
use wedding_booking::services::settings::SettingsService;

struct FixedRefresher(Result<AuthTokens, u16>);

impl TokenRefresher for FixedRefresher {
    fn refresh(&self, _refresh_token: &str) -> Result<AuthTokens, ApiError> {
        self.0.clone().map_err(|status| ApiError::Status {
            status,
            message: String::new(),
        })
    }
}

fn session(role: Role, expires_in: Duration) -> Session {
    Session {
        user: SessionUser {
            id: "u-42".to_string(),
            email: "planner@example.com".to_string(),
            name: "Dana".to_string(),
            role,
        },
        tokens: AuthTokens {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            expires_at: Utc::now() + expires_in,
        },
    }
}

#[test]
fn test_settings_persistence() {
    let dir = tempdir().expect("Failed to create temp dir");
    let service = SettingsService::new(dir.path().join("config.toml"));

    // First launch: no file yet
    let mut settings = service.get().expect("Failed to get settings");
    assert_eq!(settings, Settings::default());

    // Simulate changes made by the user
    settings.api_base_url = "https://booking.example.com".to_string();
    settings.timezone = "Europe/Lisbon".to_string();
    settings.first_day_of_week = 1;
    settings.invalid_interval_policy = InvalidIntervalPolicy::Block;
    service.update(&settings).expect("Failed to update settings");

    // Next launch reads them back
    let reopened = SettingsService::new(service.path());
    let loaded = reopened.get().expect("Failed to load settings");
    assert_eq!(loaded, settings);
    assert!(loaded.week_starts_on_monday());
    assert_eq!(loaded.time_zone(), chrono_tz::Europe::Lisbon);
}

#[test]
fn test_session_survives_restart() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");

    {
        let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
        assert!(manager.init().is_none());
        manager.login(session(Role::Admin, Duration::hours(1)));
    }

    let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
    let restored = manager.init().expect("session should be restored");
    assert_eq!(restored.user.email, "planner@example.com");
    assert!(manager.is_admin());

    manager.clear();
    assert!(!path.exists());
    assert!(!manager.is_signed_in());
}

#[test]
fn test_expiring_token_is_refreshed_and_persisted() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
    manager.login(session(Role::Customer, Duration::seconds(10)));

    let fresh = AuthTokens {
        access_token: "access-2".to_string(),
        refresh_token: "refresh-2".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    };
    let token = manager
        .access_token(&FixedRefresher(Ok(fresh)), Utc::now())
        .expect("refresh should succeed");
    assert_eq!(token, "access-2");

    let mut reopened = SessionManager::new(Box::new(FileSessionStore::new(&path)));
    let restored = reopened.init().expect("session should be restored");
    assert_eq!(restored.tokens.refresh_token, "refresh-2");
}

#[test]
fn test_failed_refresh_signs_out() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    let mut manager = SessionManager::new(Box::new(FileSessionStore::new(&path)));
    manager.login(session(Role::Customer, Duration::seconds(-5)));

    let result = manager.access_token(&FixedRefresher(Err(401)), Utc::now());
    assert!(matches!(result, Err(SessionError::RefreshFailed(_))));
    assert!(!manager.is_signed_in());
    assert!(!path.exists());
}

//! Authenticated session state.
//!
//! The session is loaded once when the store opens and written back on every
//! change. The REST client reads the bearer token through [`TokenProvider`]
//! instead of reaching into storage itself.

use std::sync::{PoisonError, RwLock};

use crate::db::KvRepository;
use crate::errors::SyncError;
use crate::models::{PersistedSession, Session};

/// Storage key the session is persisted under.
pub const SESSION_KEY: &str = "auth-storage";

const SESSION_VERSION: u32 = 0;

/// Source of the bearer token attached to outgoing requests.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Persisted session with an in-memory copy for synchronous reads.
pub struct SessionStore {
    repo: KvRepository,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Open the store and rehydrate any saved session.
    ///
    /// A blob that no longer parses is discarded rather than failing startup.
    pub async fn open(repo: KvRepository) -> Result<Self, SyncError> {
        let current = match repo.get(SESSION_KEY).await? {
            Some(raw) => match serde_json::from_str::<PersistedSession>(&raw) {
                Ok(persisted) => {
                    tracing::info!("Restored session for user {}", persisted.state.user.id);
                    Some(persisted.state)
                }
                Err(e) => {
                    tracing::warn!("Discarding unreadable saved session: {}", e);
                    repo.delete(SESSION_KEY).await?;
                    None
                }
            },
            None => None,
        };

        Ok(Self {
            repo,
            current: RwLock::new(current),
        })
    }

    /// The signed-in session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Persist `session` and make it current.
    pub async fn login(&self, session: Session) -> Result<(), SyncError> {
        let raw = serde_json::to_string(&PersistedSession {
            state: session.clone(),
            version: SESSION_VERSION,
        })?;
        self.repo.put(SESSION_KEY, &raw).await?;

        tracing::info!("Signed in as {}", session.user.id);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Forget the session in memory and on disk.
    pub async fn logout(&self) -> Result<(), SyncError> {
        self.repo.delete(SESSION_KEY).await?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::info!("Signed out");
        Ok(())
    }
}

impl TokenProvider for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use crate::models::SessionUser;
    use tempfile::TempDir;

    fn session(token: &str) -> Session {
        Session {
            user: SessionUser {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                role: Some("admin".to_string()),
            },
            token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_session_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("session.sqlite");

        let store = SessionStore::open(KvRepository::new(init_database(&db_path).await.unwrap()))
            .await
            .unwrap();
        assert!(!store.is_authenticated());
        assert_eq!(store.bearer_token(), None);

        store.login(session("tok-1")).await.unwrap();
        assert_eq!(store.bearer_token().as_deref(), Some("tok-1"));

        let reopened =
            SessionStore::open(KvRepository::new(init_database(&db_path).await.unwrap()))
                .await
                .unwrap();
        assert_eq!(reopened.current(), Some(session("tok-1")));
    }

    #[tokio::test]
    async fn test_logout_clears_storage() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("session.sqlite"))
            .await
            .unwrap();
        let repo = KvRepository::new(pool);

        let store = SessionStore::open(repo.clone()).await.unwrap();
        store.login(session("tok-2")).await.unwrap();
        store.logout().await.unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(repo.get(SESSION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_session_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("session.sqlite"))
            .await
            .unwrap();
        let repo = KvRepository::new(pool);
        repo.put(SESSION_KEY, "{not json").await.unwrap();

        let store = SessionStore::open(repo.clone()).await.unwrap();
        assert_eq!(store.current(), None);
        assert_eq!(repo.get(SESSION_KEY).await.unwrap(), None);
    }

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken(Some("abc".into())).bearer_token().as_deref(), Some("abc"));
        assert_eq!(StaticToken::default().bearer_token(), None);
    }
}

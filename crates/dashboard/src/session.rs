//! Session store for the authenticated identity.
//!
//! The store is an explicit handle: whoever needs the identity is given a
//! clone of the [`SessionStore`]. Only the login flow writes to it.
//!
//! Every login and logout bumps a generation counter. Controllers capture the
//! generation before an await and compare afterwards, so a fetch started for
//! one identity is never applied after that identity went away.

use std::sync::Arc;

use product_dashboard_core::UserId;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::api::{ApiError, ProductApi};
use crate::error::DashboardError;
use crate::form::LoginForm;

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Backend identifier of the user.
    pub user_id: UserId,
}

#[derive(Debug, Default)]
struct SessionSlot {
    current: Option<Session>,
    generation: u64,
}

/// Shared, cloneable holder of the current [`Session`].
///
/// Lives for the lifetime of the process; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<SessionSlot>>,
}

impl SessionStore {
    /// Create an empty (logged-out) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current identity.
    pub async fn login(&self, session: Session) {
        let mut slot = self.inner.write().await;
        slot.current = Some(session);
        slot.generation += 1;
    }

    /// Clear the current identity.
    pub async fn logout(&self) {
        let mut slot = self.inner.write().await;
        if slot.current.take().is_some() {
            info!("Session cleared");
        }
        slot.generation += 1;
    }

    /// The current identity, or `None` when not authenticated.
    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.current.clone()
    }

    /// Whether someone is logged in.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.current.is_some()
    }

    /// Generation counter; changes on every login and logout.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Current identity together with the generation it belongs to.
    pub async fn snapshot(&self) -> (Option<Session>, u64) {
        let slot = self.inner.read().await;
        (slot.current.clone(), slot.generation)
    }
}

/// Log in through `api` and store the resulting session.
///
/// The form is validated first; an incomplete form never reaches the
/// backend.
///
/// # Errors
///
/// - `DashboardError::Validation` if username or password is empty
/// - `DashboardError::Auth` if the backend rejects the credentials or cannot
///   be reached
#[instrument(skip(api, store, form), fields(username = %form.username))]
pub async fn authenticate<A: ProductApi>(
    api: &A,
    store: &SessionStore,
    form: &LoginForm,
) -> Result<Session, DashboardError> {
    let credentials = form.validate()?;

    let user_id = api.login(&credentials).await.map_err(|e| {
        match &e {
            ApiError::InvalidCredentials | ApiError::Status(_) => {
                warn!("Login rejected");
            }
            _ => warn!(error = %e, "Login failed"),
        }
        DashboardError::Auth(e)
    })?;

    let session = Session { user_id };
    store.login(session.clone()).await;
    info!(user_id = %session.user_id, "Logged in");
    Ok(session)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::api::fake::{Endpoint, FakeApi};
    use crate::form::ValidationError;

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_store_starts_logged_out() {
        let store = SessionStore::new();
        assert!(store.current().await.is_none());
        assert!(!store.is_authenticated().await);
        assert_eq!(store.generation().await, 0);
    }

    #[tokio::test]
    async fn test_login_and_logout_bump_generation() {
        let store = SessionStore::new();
        store
            .login(Session {
                user_id: UserId::from(5),
            })
            .await;
        assert_eq!(store.current().await.unwrap().user_id, UserId::from(5));
        assert_eq!(store.generation().await, 1);

        store.logout().await;
        assert!(store.current().await.is_none());
        assert_eq!(store.generation().await, 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store
            .login(Session {
                user_id: UserId::from("abc"),
            })
            .await;
        assert!(other.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let api = FakeApi::default();
        let store = SessionStore::new();

        let session = authenticate(&api, &store, &form("admin", "secret"))
            .await
            .unwrap();

        assert_eq!(session.user_id, UserId::from(1));
        assert_eq!(store.current().await, Some(session));
    }

    #[tokio::test]
    async fn test_authenticate_rejected() {
        let api = FakeApi::default();
        let store = SessionStore::new();

        let err = authenticate(&api, &store, &form("admin", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Auth(_)));
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_transport_failure_is_generic() {
        let api = FakeApi::default();
        api.fail(Endpoint::Login);
        let store = SessionStore::new();

        let err = authenticate(&api, &store, &form("admin", "secret"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_authenticate_empty_form_skips_backend() {
        let api = FakeApi::default();
        let store = SessionStore::new();

        let err = authenticate(&api, &store, &form("", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Validation(ValidationError::MissingCredentials)
        ));
        assert_eq!(api.count(Endpoint::Login), 0);
    }
}

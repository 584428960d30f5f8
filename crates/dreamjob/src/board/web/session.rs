use sqlx::SqlitePool;
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::{debug, warn};

use crate::board::domain::User;

pub use tower_sessions::Session as SessionHandle;

pub const SESSION_COOKIE: &str = "DREAMJOB_SESSION";

/// Sessions idle for longer than this are expired.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::minutes(30);

const USER_KEY: &str = "user";

/// Per-request view of the visitor's session. Controllers mutate it; [`Session::commit`]
/// writes the change back to the session handle once the controller is done.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<User>,
    changed: bool,
}

impl Session {
    /// A store failure leaves the visitor signed out.
    pub async fn load(handle: &SessionHandle) -> Self {
        let user = handle
            .get::<User>(USER_KEY)
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "session could not be loaded");
                None
            });
        Self {
            user,
            changed: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
        self.changed = true;
    }

    pub fn invalidate(&mut self) {
        self.user = None;
        self.changed = true;
    }

    /// Persist a changed session. A login always moves to a fresh session id.
    pub async fn commit(&self, handle: &SessionHandle) -> Result<(), tower_sessions::session::Error> {
        if !self.changed {
            return Ok(());
        }
        match &self.user {
            Some(user) => {
                handle.cycle_id().await?;
                handle.insert(USER_KEY, user).await?;
                debug!(user_id = user.id, "session started");
            }
            None => {
                handle.flush().await?;
                debug!("session closed");
            }
        }
        Ok(())
    }
}

/// Session records kept next to the users table.
pub async fn session_store(pool: SqlitePool) -> Result<SqliteStore, sqlx::Error> {
    let store = SqliteStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

/// Cookie-backed session layer: `HttpOnly`, `SameSite=Lax`, expiring after
/// [`SESSION_IDLE_TIMEOUT`] of inactivity.
pub fn session_layer(store: SqliteStore) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_secure(false)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(SESSION_IDLE_TIMEOUT))
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

/// The signed-in user for the current browsing session. Nothing is
/// authenticated for real; this is the stand-in the rest of the app
/// reads instead of reaching into ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Session state seam: current user plus favorite field ids.
/// Constructed once at startup; `clear` is the logout path and wipes
/// everything.
pub trait SessionRepository: Send + Sync {
    fn current_user(&self) -> Option<SessionUser>;
    fn set_current_user(&self, user: SessionUser);
    fn favorites(&self) -> Vec<Uuid>;
    /// Returns false if the field was already a favorite
    fn add_favorite(&self, field_id: Uuid) -> bool;
    fn remove_favorite(&self, field_id: Uuid) -> bool;
    fn is_favorite(&self, field_id: Uuid) -> bool;
    fn clear(&self);
}

#[derive(Default)]
struct SessionState {
    user: Option<SessionUser>,
    favorites: HashSet<Uuid>,
}

/// The shipped implementation: a Mutex-guarded in-memory session
pub struct InMemorySessionStore {
    state: Mutex<SessionState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
        }
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // A poisoned session is unrecoverable noise; take the state anyway
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemorySessionStore {
    fn current_user(&self) -> Option<SessionUser> {
        self.locked().user.clone()
    }

    fn set_current_user(&self, user: SessionUser) {
        tracing::debug!(user = %user.email, "session user set");
        self.locked().user = Some(user);
    }

    fn favorites(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.locked().favorites.iter().copied().collect();
        ids.sort();
        ids
    }

    fn add_favorite(&self, field_id: Uuid) -> bool {
        self.locked().favorites.insert(field_id)
    }

    fn remove_favorite(&self, field_id: Uuid) -> bool {
        self.locked().favorites.remove(&field_id)
    }

    fn is_favorite(&self, field_id: Uuid) -> bool {
        self.locked().favorites.contains(&field_id)
    }

    fn clear(&self) {
        let mut state = self.locked();
        state.user = None;
        state.favorites.clear();
    }
}

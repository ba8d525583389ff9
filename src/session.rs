use crate::models::Session;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// In-memory holder for the logged-in user. Nothing is persisted; a fresh
/// client starts signed out.
#[derive(Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_user(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn sign_in(&self, session: Session) {
        info!(user_id = %session.user_id, "session started");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn sign_out(&self) {
        if self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            info!("session cleared");
        }
    }
}

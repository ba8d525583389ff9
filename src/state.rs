use crate::location::Location;
use crate::routes::RouteTable;
use crate::services::{AuthService, TaskService};
use crate::session::SessionStore;
use std::time::Duration;
use tokio::time::sleep;

/// What view controllers get to work with besides their own subtree.
#[derive(Clone)]
pub struct AppContext {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub session: SessionStore,
    pub location: Location,
    pub redirect_delay: Duration,
}

impl AppContext {
    /// Navigates to `hash` once the redirect delay has passed.
    pub fn navigate_later(&self, hash: &str) {
        let location = self.location.clone();
        let delay = self.redirect_delay;
        let hash = hash.to_string();
        tokio::spawn(async move {
            sleep(delay).await;
            location.assign(&hash);
        });
    }
}

/// Shared state of the fragment host.
#[derive(Clone)]
pub struct HostState {
    pub routes: RouteTable,
    pub api_url: String,
}

impl HostState {
    pub fn new(routes: RouteTable, api_url: impl Into<String>) -> Self {
        Self {
            routes,
            api_url: api_url.into(),
        }
    }
}

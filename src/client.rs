use crate::config::Config;
use crate::dom::Page;
use crate::fragments::{FragmentSource, HttpFragments};
use crate::http::ApiClient;
use crate::location::Location;
use crate::router::Router;
use crate::routes::RouteTable;
use crate::services::{AuthService, TaskService};
use crate::session::SessionStore;
use crate::state::AppContext;
use std::sync::Arc;

/// A wired-up client: page, location, services and the router driving them.
#[derive(Clone)]
pub struct Client {
    pub router: Arc<Router>,
    pub context: AppContext,
}

impl Client {
    /// Client that fetches its fragments from `config.views_url`.
    pub fn from_config(config: &Config, initial_hash: &str) -> Self {
        let fragments = Arc::new(HttpFragments::new(config.views_url.clone()));
        Self::with_fragments(config, fragments, initial_hash)
    }

    pub fn with_fragments(config: &Config, fragments: Arc<dyn FragmentSource>, initial_hash: &str) -> Self {
        let api = ApiClient::new(config.api_url.clone());
        let session = SessionStore::new();
        let context = AppContext {
            auth: AuthService::new(api.clone()),
            tasks: TaskService::new(api, session.clone()),
            session,
            location: Location::new(initial_hash),
            redirect_delay: config.redirect_delay,
        };
        let router = Router::new(
            RouteTable::for_variant(config.variant),
            fragments,
            Page::new(),
            context.clone(),
        );
        Self { router, context }
    }

    pub async fn start(&self) -> bool {
        self.router.initialize().await
    }

    pub fn page(&self) -> &Page {
        self.router.page()
    }

    pub fn location(&self) -> &Location {
        &self.context.location
    }

    pub fn session(&self) -> &SessionStore {
        &self.context.session
    }
}

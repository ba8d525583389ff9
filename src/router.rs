//! Hash router: maps the location hash to a view, loads its fragment, swaps
//! it into the page root and mounts the view's controller.
//!
//! Navigation is last-started-wins. Every render takes a token from a
//! monotonically increasing counter; when its fragment arrives, the render
//! only touches the page if its token is still the newest one. Older loads
//! finish quietly.

use crate::dom::Page;
use crate::errors::ClientError;
use crate::fragments::FragmentSource;
use crate::location::Location;
use crate::routes::{Route, RouteTable};
use crate::state::AppContext;
use crate::ui::ROUTE_ERROR_HTML;
use crate::views::{self, Mount, Teardown};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterState {
    Idle,
    Loading(String),
    Rendered(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// A newer navigation started while this one was loading.
    Superseded,
}

struct ActiveView {
    route: &'static str,
    teardown: Teardown,
}

struct Navigation {
    latest: u64,
    state: RouterState,
    active: Option<ActiveView>,
    mounts: u64,
}

pub struct Router {
    routes: RouteTable,
    fragments: Arc<dyn FragmentSource>,
    page: Page,
    context: AppContext,
    nav: Mutex<Navigation>,
    initialized: AtomicBool,
}

impl Router {
    pub fn new(
        routes: RouteTable,
        fragments: Arc<dyn FragmentSource>,
        page: Page,
        context: AppContext,
    ) -> Arc<Self> {
        Arc::new(Self {
            routes,
            fragments,
            page,
            context,
            nav: Mutex::new(Navigation {
                latest: 0,
                state: RouterState::Idle,
                active: None,
                mounts: 0,
            }),
            initialized: AtomicBool::new(false),
        })
    }

    fn nav(&self) -> MutexGuard<'_, Navigation> {
        self.nav.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn location(&self) -> &Location {
        &self.context.location
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn state(&self) -> RouterState {
        self.nav().state.clone()
    }

    /// Route whose view is currently mounted.
    pub fn current_route(&self) -> Option<&'static str> {
        self.nav().active.as_ref().map(|active| active.route)
    }

    /// How many view initializers have run so far.
    pub fn mount_count(&self) -> u64 {
        self.nav().mounts
    }

    /// Starts listening for hash changes and renders the current hash.
    ///
    /// Only the first call does anything; later calls return `false` without
    /// registering a second listener.
    pub async fn initialize(self: &Arc<Self>) -> bool {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("router already initialized");
            return false;
        }

        let mut changes = self.location().subscribe();
        let router: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let Some(router) = router.upgrade() else { break };
                tokio::spawn(async move { router.handle_route().await });
            }
        });

        info!(default = self.routes.default_route().name, "router started");
        self.handle_route().await;
        true
    }

    pub fn resolve_route(&self, raw_hash: &str) -> &Route {
        self.routes.resolve(raw_hash)
    }

    /// Renders whatever the location currently points at. Load failures are
    /// logged and shown in place of the view, never returned.
    ///
    /// The hash is read under the same lock that hands out the token, so the
    /// newest token always belongs to the newest hash.
    pub async fn handle_route(&self) {
        let (route, token) = {
            let mut nav = self.nav();
            let hash = self.location().hash();
            let route = self.routes.resolve(&hash);
            (route, Self::begin(&mut nav, route))
        };
        if let Err(err) = self.finish_route(route, token).await {
            error!(route = route.name, %err, "failed to render view");
        }
    }

    pub async fn render_route(&self, name: &str) -> Result<RenderOutcome, ClientError> {
        let route = self.routes.get(name).unwrap_or_else(|| self.routes.default_route());
        let token = Self::begin(&mut self.nav(), route);
        self.finish_route(route, token).await
    }

    fn begin(nav: &mut Navigation, route: &Route) -> u64 {
        nav.latest += 1;
        nav.state = RouterState::Loading(route.name.to_string());
        nav.latest
    }

    async fn finish_route(&self, route: &Route, token: u64) -> Result<RenderOutcome, ClientError> {
        info!(route = route.name, token, "loading view");

        let loaded = self.fragments.load(route.fragment).await;

        let mut nav = self.nav();
        if nav.latest != token {
            debug!(route = route.name, token, latest = nav.latest, "discarding stale view load");
            return Ok(RenderOutcome::Superseded);
        }

        if let Some(previous) = nav.active.take() {
            previous.teardown.run();
        }

        match loaded {
            Ok(html) => {
                let generation = self.page.replace_root(&html);
                let mount = Mount::new(self.page.clone(), generation);
                let teardown = views::initialize(route.view, &mount, &self.context);
                debug!(route = route.name, listeners = teardown.len(), "view mounted");
                nav.active = Some(ActiveView {
                    route: route.name,
                    teardown,
                });
                nav.mounts += 1;
                nav.state = RouterState::Rendered(route.name.to_string());
                Ok(RenderOutcome::Rendered)
            }
            Err(err) => {
                self.page.replace_root(ROUTE_ERROR_HTML);
                nav.state = RouterState::Error(route.name.to_string());
                Err(err)
            }
        }
    }
}

use crate::config::Variant;

/// The view controller a route mounts after its fragment is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Login,
    Register,
    Recover,
    Dashboard,
    Home,
    Board,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    /// Fragment name, resolved by the router's fragment source.
    pub fragment: &'static str,
    pub view: ViewKind,
}

impl Route {
    pub const fn new(name: &'static str, fragment: &'static str, view: ViewKind) -> Self {
        Self { name, fragment, view }
    }

    pub fn hash(&self) -> String {
        format!("#/{}", self.name)
    }
}

/// Immutable route set. The first route is the fallback for unknown hashes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Returns `None` for an empty table or duplicate names.
    pub fn new(routes: Vec<Route>) -> Option<Self> {
        if routes.is_empty() {
            return None;
        }
        let unique = routes
            .iter()
            .enumerate()
            .all(|(i, route)| routes[..i].iter().all(|other| other.name != route.name));
        unique.then_some(Self { routes })
    }

    pub fn accounts() -> Self {
        Self {
            routes: vec![
                Route::new("login", "login", ViewKind::Login),
                Route::new("register", "register", ViewKind::Register),
                Route::new("recover", "recover", ViewKind::Recover),
                Route::new("dashboard", "dashboard", ViewKind::Dashboard),
            ],
        }
    }

    pub fn todo() -> Self {
        Self {
            routes: vec![
                Route::new("home", "home", ViewKind::Home),
                Route::new("board", "board", ViewKind::Board),
            ],
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Accounts => Self::accounts(),
            Variant::Todo => Self::todo(),
        }
    }

    pub fn default_route(&self) -> &Route {
        &self.routes[0]
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route for a raw location hash: `#/` is stripped, anything unknown or
    /// empty maps to the default route.
    pub fn resolve(&self, raw_hash: &str) -> &Route {
        let name = raw_hash.strip_prefix("#/").unwrap_or("");
        self.get(name).unwrap_or_else(|| self.default_route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve_to_themselves() {
        for table in [RouteTable::accounts(), RouteTable::todo()] {
            for route in table.routes() {
                assert_eq!(table.resolve(&route.hash()).name, route.name);
            }
        }
    }

    #[test]
    fn unknown_or_malformed_hashes_fall_back() {
        let table = RouteTable::accounts();
        for raw in ["", "#", "#/", "#/nope", "#/LOGIN", "#dashboard", "/dashboard", "#/dashboard/extra"] {
            assert_eq!(table.resolve(raw).name, "login", "hash {raw:?}");
        }
        assert_eq!(RouteTable::todo().resolve("#/settings").name, "home");
    }

    #[test]
    fn table_rejects_empty_and_duplicates() {
        assert!(RouteTable::new(Vec::new()).is_none());
        let dup = vec![
            Route::new("a", "a", ViewKind::Home),
            Route::new("a", "b", ViewKind::Board),
        ];
        assert!(RouteTable::new(dup).is_none());
        let ok = RouteTable::new(vec![Route::new("board", "board", ViewKind::Board)]).unwrap();
        assert_eq!(ok.default_route().name, "board");
    }
}

//! The route table: the declarative, startup-fixed route registry.

use crate::error::RouteTableError;
use crate::route::Route;

/// An ordered registry of routes.
///
/// Route names and path patterns are unique within a table; requested paths
/// are matched in registration order, first match wins. A table may carry an
/// optional catch-all fallback route that `resolve_or_fallback` returns for
/// unmatched paths.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Option<Route>,
}

impl RouteTable {
    /// Starts building a route table.
    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Resolves a requested path against registered patterns in
    /// registration order. Returns the first match, or `None`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path.matches(path))
    }

    /// Like [`resolve`](Self::resolve), but falls back to the catch-all
    /// route when one is registered.
    #[must_use]
    pub fn resolve_or_fallback(&self, path: &str) -> Option<&Route> {
        self.resolve(path).or(self.fallback.as_ref())
    }

    /// Looks a route up by its symbolic name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name.as_str() == name)
    }

    /// Returns the catch-all fallback route, if registered.
    #[must_use]
    pub fn fallback(&self) -> Option<&Route> {
        self.fallback.as_ref()
    }

    /// Iterates routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of registered routes, excluding the fallback.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true when no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder enforcing the table's uniqueness invariants at registration.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
    fallback: Option<Route>,
}

impl RouteTableBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route.
    ///
    /// # Errors
    ///
    /// Returns an error if a route with the same name or path pattern is
    /// already registered.
    pub fn route(mut self, route: Route) -> Result<Self, RouteTableError> {
        if self.routes.iter().any(|r| r.name == route.name) {
            return Err(RouteTableError::DuplicateName {
                name: route.name.to_string(),
            });
        }
        if self.routes.iter().any(|r| r.path == route.path) {
            return Err(RouteTableError::DuplicatePath {
                path: route.path.to_string(),
            });
        }
        self.routes.push(route);
        Ok(self)
    }

    /// Registers the catch-all fallback route for unmatched paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a fallback is already set.
    pub fn fallback(mut self, route: Route) -> Result<Self, RouteTableError> {
        if let Some(existing) = &self.fallback {
            return Err(RouteTableError::FallbackAlreadySet {
                name: existing.name.to_string(),
            });
        }
        self.fallback = Some(route);
        Ok(self)
    }

    /// Finalises the table.
    #[must_use]
    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{View, ViewHandle};

    struct StubView(&'static str);

    impl View for StubView {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self) -> String {
            String::new()
        }
    }

    fn route(name: &'static str, path: &str) -> Route {
        Route::eager(name, path, ViewHandle::new(StubView(name))).expect("valid route")
    }

    fn table() -> RouteTable {
        RouteTable::builder()
            .route(route("home", "/"))
            .and_then(|b| b.route(route("ai", "/ai")))
            .and_then(|b| b.route(route("list", "/list")))
            .expect("valid table")
            .build()
    }

    #[test]
    fn resolves_in_registration_order() {
        let table = table();
        assert_eq!(table.resolve("/").expect("match").name.as_str(), "home");
        assert_eq!(table.resolve("/ai").expect("match").name.as_str(), "ai");
        assert_eq!(table.resolve("/list").expect("match").name.as_str(), "list");
    }

    #[test]
    fn unmatched_path_is_none() {
        let table = table();
        assert!(table.resolve("/does-not-exist").is_none());
        assert!(table.resolve_or_fallback("/does-not-exist").is_none());
    }

    #[test]
    fn fallback_catches_unmatched_paths() {
        let table = RouteTable::builder()
            .route(route("home", "/"))
            .and_then(|b| b.fallback(route("not-found", "/404")))
            .expect("valid table")
            .build();

        assert!(table.resolve("/missing").is_none());
        let caught = table.resolve_or_fallback("/missing").expect("fallback");
        assert_eq!(caught.name.as_str(), "not-found");

        // A direct match still wins over the fallback.
        assert_eq!(
            table.resolve_or_fallback("/").expect("match").name.as_str(),
            "home"
        );
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = RouteTable::builder()
            .route(route("home", "/"))
            .and_then(|b| b.route(route("home", "/other")))
            .unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicateName { .. }));
    }

    #[test]
    fn duplicate_path_rejected() {
        let err = RouteTable::builder()
            .route(route("home", "/"))
            .and_then(|b| b.route(route("landing", "/")))
            .unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicatePath { .. }));
    }

    #[test]
    fn duplicate_fallback_rejected() {
        let err = RouteTable::builder()
            .fallback(route("not-found", "/404"))
            .and_then(|b| b.fallback(route("other", "/oops")))
            .unwrap_err();
        assert!(matches!(err, RouteTableError::FallbackAlreadySet { .. }));
    }

    #[test]
    fn lookup_by_name() {
        let table = table();
        assert!(table.get("ai").is_some());
        assert!(table.get("missing").is_none());
        assert_eq!(table.len(), 3);
    }
}

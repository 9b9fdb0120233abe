//! Application route definitions.
//!
//! Each page route carries a title and the access rule resolved for it from
//! the route table at construction time.

use taskflow_access::{matches_pattern, AccessRule, RouteTable};

/// Where a route is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePath {
    /// Index route of the main layout (`/`).
    Index,
    /// Path relative to the root (`"category/:categoryId"`), or `"*"`.
    Path(&'static str),
}

impl RoutePath {
    /// Path used to look up the route's access config.
    pub fn config_path(&self) -> String {
        match self {
            RoutePath::Index => "/".to_string(),
            RoutePath::Path(p) if p.starts_with('/') => p.to_string(),
            RoutePath::Path(p) => format!("/{p}"),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, RoutePath::Path("*"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppRoute {
    pub path: RoutePath,
    pub title: &'static str,
    pub access: Option<AccessRule>,
}

impl AppRoute {
    pub fn matches(&self, pathname: &str) -> bool {
        self.path.is_catch_all() || matches_pattern(pathname, &self.path.config_path())
    }
}

/// Build a route, attaching an explicit access rule or else the one the
/// table resolves for the route's config path.
pub fn create_route(table: &RouteTable, path: RoutePath, title: &'static str, access: Option<AccessRule>) -> AppRoute {
    let access = access.or_else(|| {
        table
            .resolve(&path.config_path())
            .and_then(|config| config.allow.clone())
    });

    AppRoute { path, title, access }
}

/// Ordered route list; the catch-all comes last.
#[derive(Debug, Clone, PartialEq)]
pub struct AppRoutes {
    routes: Vec<AppRoute>,
}

impl AppRoutes {
    pub fn new(routes: Vec<AppRoute>) -> Self {
        Self { routes }
    }

    /// The task manager's pages.
    pub fn builtin(table: &RouteTable) -> Self {
        let page = |path: RoutePath, title: &'static str| create_route(table, path, title, None);

        Self::new(vec![
            page(RoutePath::Path("login"), "Login"),
            page(RoutePath::Path("signup"), "Sign Up"),
            page(RoutePath::Path("callback"), "Authentication Callback"),
            page(RoutePath::Path("error"), "Error"),
            page(
                RoutePath::Path("prompt-password/:appId/:emailAddress/:provider"),
                "Prompt Password",
            ),
            page(RoutePath::Path("reset-password/:appId/:fields"), "Reset Password"),
            page(RoutePath::Index, "All Tasks"),
            page(RoutePath::Path("category/:categoryId"), "Category Tasks"),
            page(RoutePath::Path("priority/:priority"), "Priority Tasks"),
            page(RoutePath::Path("overdue"), "Overdue Tasks"),
            page(RoutePath::Path("today"), "Today Tasks"),
            page(RoutePath::Path("upcoming"), "Upcoming Tasks"),
            page(RoutePath::Path("completed"), "Completed Tasks"),
            page(RoutePath::Path("*"), "Page Not Found"),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppRoute> {
        self.routes.iter()
    }

    /// Route rendering a concrete path: an exact path first, then the first
    /// pattern match, then the catch-all.
    pub fn find(&self, pathname: &str) -> Option<&AppRoute> {
        let concrete = || self.routes.iter().filter(|r| !r.path.is_catch_all());

        concrete()
            .find(|r| r.path.config_path() == pathname)
            .or_else(|| concrete().find(|r| r.matches(pathname)))
            .or_else(|| self.routes.iter().find(|r| r.path.is_catch_all()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_access::{Condition, Rule};

    fn routes() -> AppRoutes {
        AppRoutes::builtin(&RouteTable::builtin())
    }

    fn rule(route: &AppRoute) -> Option<&Rule> {
        route.access.as_ref().map(|a| &a.conditions()[0].rule)
    }

    #[test]
    fn config_paths() {
        assert_eq!(RoutePath::Index.config_path(), "/");
        assert_eq!(RoutePath::Path("today").config_path(), "/today");
        assert_eq!(RoutePath::Path("/today").config_path(), "/today");
        assert!(RoutePath::Path("*").is_catch_all());
    }

    #[test]
    fn find_returns_titles_for_concrete_paths() {
        let routes = routes();
        assert_eq!(routes.find("/").map(|r| r.title), Some("All Tasks"));
        assert_eq!(routes.find("/category/42").map(|r| r.title), Some("Category Tasks"));
        assert_eq!(
            routes.find("/prompt-password/app/a@b.com/google").map(|r| r.title),
            Some("Prompt Password")
        );
        assert_eq!(routes.find("/settings").map(|r| r.title), Some("Page Not Found"));
        assert_eq!(routes.find("/today/extra").map(|r| r.title), Some("Page Not Found"));
    }

    #[test]
    fn access_rules_come_from_the_table() {
        let routes = routes();
        assert_eq!(rule(routes.find("/").unwrap()), Some(&Rule::Authenticated));
        assert_eq!(rule(routes.find("/login").unwrap()), Some(&Rule::Public));
        // "/category/:categoryId" is a single segment under "/category/*".
        assert_eq!(rule(routes.find("/category/1").unwrap()), Some(&Rule::Authenticated));
    }

    #[test]
    fn multi_segment_routes_get_no_access_rule() {
        let routes = routes();
        assert_eq!(routes.find("/prompt-password/a/b/c").unwrap().access, None);
        assert_eq!(routes.find("/reset-password/a/b").unwrap().access, None);
        assert_eq!(routes.find("/missing").unwrap().access, None);
    }

    #[test]
    fn explicit_access_overrides_table() {
        let table = RouteTable::builtin();
        let explicit = AccessRule::any(vec![Condition::public("Always open")]);
        let route = create_route(&table, RoutePath::Path("today"), "Today", Some(explicit.clone()));
        assert_eq!(route.access, Some(explicit));
    }
}

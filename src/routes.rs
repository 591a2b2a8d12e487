//! Route table and navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The router consults `redirect_for` before rendering any path. Checks run
//! in a fixed order and the first failing one decides: authentication, then
//! guest exclusivity, then admin privilege. An authenticated non-admin user
//! hitting an admin route therefore lands on home, not on the login page.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
/// Where `/` sends the user once the guard has let them through.
pub const LANDING_PATH: &str = "/certificates";

/// Per-route access flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub guest: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    const PUBLIC: Self = Self { requires_auth: false, guest: false, requires_admin: false };
    const GUEST: Self = Self { requires_auth: false, guest: true, requires_admin: false };
    const AUTH: Self = Self { requires_auth: true, guest: false, requires_admin: false };
    const ADMIN: Self = Self { requires_auth: true, guest: false, requires_admin: true };
}

/// One declared route. `:name` segments match any single path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: &'static str,
    pub meta: RouteMeta,
}

/// Every route the console serves, in match priority order.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry { path: "/login", name: "Login", meta: RouteMeta::GUEST },
    RouteEntry { path: "/", name: "Home", meta: RouteMeta::PUBLIC },
    RouteEntry { path: "/certificates", name: "CertificateList", meta: RouteMeta::AUTH },
    RouteEntry { path: "/certificates/new", name: "CertificateCreate", meta: RouteMeta::AUTH },
    RouteEntry { path: "/certificates/:id", name: "CertificateDetail", meta: RouteMeta::AUTH },
    RouteEntry { path: "/workspaces", name: "WorkspaceList", meta: RouteMeta::AUTH },
    RouteEntry { path: "/workspaces/:id", name: "WorkspaceDetail", meta: RouteMeta::AUTH },
    RouteEntry { path: "/profile", name: "Profile", meta: RouteMeta::AUTH },
    RouteEntry { path: "/users", name: "UserList", meta: RouteMeta::ADMIN },
];

/// Result of guarding one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    RedirectToLogin,
    RedirectHome,
}

impl GuardOutcome {
    /// Redirect target, or `None` when the navigation may proceed.
    pub fn target(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectHome => Some(HOME_PATH),
        }
    }
}

/// Decide whether a navigation to a route with `meta` may proceed.
pub fn evaluate(meta: RouteMeta, session: &Session) -> GuardOutcome {
    let authenticated = session.is_authenticated();
    if meta.requires_auth && !authenticated {
        GuardOutcome::RedirectToLogin
    } else if meta.guest && authenticated {
        GuardOutcome::RedirectHome
    } else if meta.requires_admin && !session.is_admin() {
        GuardOutcome::RedirectHome
    } else {
        GuardOutcome::Allow
    }
}

/// Find the declared route for a concrete path.
pub fn match_route(path: &str) -> Option<&'static RouteEntry> {
    let wanted: Vec<&str> = segments(path).collect();
    ROUTES.iter().find(|route| {
        let pattern: Vec<&str> = segments(route.path).collect();
        pattern.len() == wanted.len()
            && pattern
                .iter()
                .zip(&wanted)
                .all(|(p, w)| p.starts_with(':') || p == w)
    })
}

/// Redirect target for navigating to `path`, if any. Undeclared paths pass.
pub fn redirect_for(path: &str, session: &Session) -> Option<&'static str> {
    match_route(path).and_then(|route| evaluate(route.meta, session).target())
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

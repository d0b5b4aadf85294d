//! Client-side router with hash-history semantics.
//!
//! The route table is declarative: each [`RouteRecord`] maps a path to a
//! [`View`], and child paths are relative to their parent. Navigation never
//! leaves the process; locations are rendered as `#/path` fragments.
//!
//! Matching is case-insensitive, ignores a trailing slash, and splits off any
//! query string. There are no guards and no redirects; the only automatic
//! navigation is the one `AppStore::app_init` performs.
//!
//! # Example
//!
//! ```
//! use account_desk_core::router::{Router, View};
//!
//! let router = Router::with_default_routes();
//! let location = router.push("/clientAccounts").unwrap();
//! assert_eq!(location.matched, vec![View::Home, View::ClientAccounts]);
//! assert_eq!(Router::href("/clientAccounts"), "#/clientAccounts");
//! ```

mod error;

pub use error::RouterError;

use std::fmt;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

/// Path of the home view.
pub const ROOT_PATH: &str = "/";
/// Path of the login/setup view.
pub const LOGIN_PATH: &str = "/login";

/// Views the router can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    Home,
    Login,
    ClientAccounts,
    ClientPrivateMessage,
}

impl View {
    /// Returns the view's display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::ClientAccounts => "ClientAccounts",
            Self::ClientPrivateMessage => "ClientPrivateMessage",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    /// Absolute path for top-level records, parent-relative for children.
    pub path: &'static str,
    pub view: View,
    pub children: Vec<RouteRecord>,
}

impl RouteRecord {
    /// Creates a record without children.
    #[must_use]
    pub fn new(path: &'static str, view: View) -> Self {
        Self {
            path,
            view,
            children: Vec::new(),
        }
    }

    /// Attaches nested child records.
    #[must_use]
    pub fn with_children(mut self, children: Vec<RouteRecord>) -> Self {
        self.children = children;
        self
    }
}

/// The application's route table.
#[must_use]
pub fn default_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new(ROOT_PATH, View::Home).with_children(vec![
            RouteRecord::new("clientAccounts", View::ClientAccounts),
            RouteRecord::new("clientPrivateMessage", View::ClientPrivateMessage),
        ]),
        RouteRecord::new(LOGIN_PATH, View::Login),
    ]
}

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Canonical full path of the matched route.
    pub path: String,
    /// Query string without the leading `?`, if one was given.
    pub query: Option<String>,
    /// Views activated by this location, outermost first.
    pub matched: Vec<View>,
}

impl Location {
    /// Returns the innermost activated view.
    #[must_use]
    pub fn view(&self) -> Option<View> {
        self.matched.last().copied()
    }

    /// Renders the location as a hash fragment.
    #[must_use]
    pub fn href(&self) -> String {
        match &self.query {
            Some(query) => format!("#{}?{query}", self.path),
            None => format!("#{}", self.path),
        }
    }

    fn unmatched(path: &str) -> Self {
        Self {
            path: path.to_string(),
            query: None,
            matched: Vec::new(),
        }
    }
}

/// Navigation state published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    current: Location,
    previous: Vec<Location>,
}

impl NavigationHistory {
    /// The active location.
    #[must_use]
    pub fn current(&self) -> &Location {
        &self.current
    }

    /// Number of entries, including the active one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.previous.len() + 1
    }

    /// Always false; the history holds at least the active location.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A flattened route: full path plus the chain of views it activates.
#[derive(Debug, Clone)]
struct ResolvedRoute {
    full_path: String,
    matched: Vec<View>,
}

/// Hash-history router over a fixed route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<RouteRecord>,
    table: Vec<ResolvedRoute>,
    history: watch::Sender<NavigationHistory>,
}

impl Router {
    /// Creates a router over `routes`, positioned at `/`.
    #[must_use]
    pub fn new(routes: Vec<RouteRecord>) -> Self {
        let mut table = Vec::new();
        flatten_routes(&routes, "", &[], &mut table);

        let initial = match_path(&table, ROOT_PATH, None)
            .unwrap_or_else(|| Location::unmatched(ROOT_PATH));
        let (history, _) = watch::channel(NavigationHistory {
            current: initial,
            previous: Vec::new(),
        });

        Self {
            routes,
            table,
            history,
        }
    }

    /// Creates a router over [`default_routes`].
    #[must_use]
    pub fn with_default_routes() -> Self {
        Self::new(default_routes())
    }

    /// The declarative route table this router was built from.
    #[must_use]
    pub fn routes(&self) -> &[RouteRecord] {
        &self.routes
    }

    /// Every navigable full path with the views it activates, in table order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &[View])> {
        self.table
            .iter()
            .map(|route| (route.full_path.as_str(), route.matched.as_slice()))
    }

    /// Resolves `path` against the table without navigating.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Location> {
        let (path, query) = split_query(path);
        match_path(&self.table, &normalize_path(path), query)
    }

    /// Navigates to `path`, appending a history entry.
    ///
    /// Pushing the active location (same path and query) is a no-op: no
    /// entry is added and subscribers are not woken.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoMatch`] when no route matches; the current
    /// location is left unchanged.
    pub fn push(&self, path: &str) -> Result<Location, RouterError> {
        let Some(location) = self.resolve(path) else {
            debug!(path, "Navigation rejected: no matching route");
            return Err(RouterError::NoMatch {
                path: path.to_string(),
            });
        };

        let moved = self.history.send_if_modified(|history| {
            if history.current == location {
                return false;
            }
            let previous = std::mem::replace(&mut history.current, location.clone());
            history.previous.push(previous);
            true
        });
        if moved {
            info!(path = %location.path, view = ?location.view(), "Navigating");
        } else {
            debug!(path = %location.path, "Already at location");
        }
        Ok(location)
    }

    /// Navigates to a hash fragment such as `#/login`; an empty hash means `/`.
    ///
    /// # Errors
    ///
    /// Same as [`Router::push`].
    pub fn push_hash(&self, hash: &str) -> Result<Location, RouterError> {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        if path.is_empty() {
            self.push(ROOT_PATH)
        } else {
            self.push(path)
        }
    }

    /// Returns to the previous location, if there is one.
    pub fn back(&self) -> Option<Location> {
        let mut moved = None;
        self.history.send_if_modified(|history| {
            let Some(previous) = history.previous.pop() else {
                return false;
            };
            history.current = previous;
            moved = Some(history.current.clone());
            true
        });
        moved
    }

    /// The active location.
    #[must_use]
    pub fn current(&self) -> Location {
        self.history.borrow().current.clone()
    }

    /// Receives every navigation as it happens.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<NavigationHistory> {
        self.history.subscribe()
    }

    /// Renders `path` as a hash-history link.
    #[must_use]
    pub fn href(path: &str) -> String {
        let (path, query) = split_query(path);
        let path = normalize_path(path);
        match query {
            Some(query) => format!("#{path}?{query}"),
            None => format!("#{path}"),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_default_routes()
    }
}

fn flatten_routes(
    records: &[RouteRecord],
    parent_path: &str,
    parent_views: &[View],
    table: &mut Vec<ResolvedRoute>,
) {
    for record in records {
        let full_path = join_paths(parent_path, record.path);
        let mut matched = parent_views.to_vec();
        matched.push(record.view);

        table.push(ResolvedRoute {
            full_path: full_path.clone(),
            matched: matched.clone(),
        });
        flatten_routes(&record.children, &full_path, &matched, table);
    }
}

fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return normalize_path(child);
    }
    normalize_path(&format!("{}/{child}", parent.trim_end_matches('/')))
}

fn split_query(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((path, query)) if !query.is_empty() => (path, Some(query)),
        Some((path, _)) => (path, None),
        None => (raw, None),
    }
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return ROOT_PATH.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn match_path(table: &[ResolvedRoute], path: &str, query: Option<&str>) -> Option<Location> {
    table
        .iter()
        .find(|route| route.full_path.eq_ignore_ascii_case(path))
        .map(|route| Location {
            path: route.full_path.clone(),
            query: query.map(str::to_string),
            matched: route.matched.clone(),
        })
}

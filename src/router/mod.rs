//! In-app navigation.
//!
//! `Router` resolves paths against the route table and consults the
//! `NavigationGuard` before every transition, following redirects until a
//! screen is reached.

pub mod guard;
pub mod route;

pub use guard::{NavigationDecision, NavigationGuard};
pub use route::{normalize_path, Route, HOME_PATH, LOGIN_PATH, ROOT_PATH};

use thiserror::Error;
use tracing::debug;

use crate::auth::CredentialProvider;

/// Maximum redirects followed for a single navigation.
/// The guard never produces chains longer than two; anything past this is a loop.
const MAX_REDIRECTS: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Too many redirects while navigating to {0}")]
    RedirectLoop(String),
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The path that was asked for
    pub requested: String,
    /// Where navigation ended up
    pub route: Route,
    /// The screen navigated away from, if any
    pub from: Option<Route>,
    /// True when the final route differs from the request because of a redirect
    pub redirected: bool,
}

pub struct Router<P> {
    guard: NavigationGuard<P>,
    current: Option<Route>,
}

impl<P: CredentialProvider> Router<P> {
    pub fn new(credentials: P) -> Self {
        Self {
            guard: NavigationGuard::new(credentials),
            current: None,
        }
    }

    /// Create a router that is already showing `route`, without running the guard
    pub fn starting_at(credentials: P, route: Route) -> Self {
        Self {
            guard: NavigationGuard::new(credentials),
            current: Some(route),
        }
    }

    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Navigate to `path`, applying table redirects and the guard.
    /// On error the current route is left unchanged.
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, RouterError> {
        let from_path = self
            .current
            .as_ref()
            .map(Route::path)
            .unwrap_or_else(|| ROOT_PATH.to_string());

        let mut target = normalize_path(path);
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            if let Some(to) = route::static_redirect(&target) {
                debug!(from = %target, to = to, "Route table redirect");
                target = to.to_string();
                redirected = true;
                continue;
            }

            match self.guard.check(&target, &from_path) {
                NavigationDecision::Proceed => {
                    let route = Route::parse(&target)
                        .ok_or_else(|| RouterError::NotFound(target.clone()))?;
                    debug!(from = %from_path, to = %route, redirected, "Navigated");

                    let from = self.current.replace(route.clone());
                    return Ok(Navigation {
                        requested: path.to_string(),
                        route,
                        from,
                        redirected,
                    });
                }
                NavigationDecision::Redirect(to) => {
                    debug!(from = %target, to = to, "Guard redirect");
                    target = to.to_string();
                    redirected = true;
                }
            }
        }

        Err(RouterError::RedirectLoop(path.to_string()))
    }
}

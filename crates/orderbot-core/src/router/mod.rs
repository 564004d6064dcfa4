//! Client-side routing with an authentication guard.
//!
//! Routes carry a `requires_auth` flag. Before every transition the
//! `Router` resolves redirect aliases and asks the guard whether the target
//! may be entered; protected routes without a stored credential are sent to
//! the login route with the intended destination in `?redirect=`.
//!
//! The `Navigator` trait is how the API client triggers navigation without
//! knowing about the router.

pub mod guard;
pub mod location;
pub mod route;

pub use guard::{evaluate, GuardDecision};
pub use location::Location;
pub use route::{Route, RouteTable, LOGIN_PATH};

use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::SessionStore;

/// Upper bound on chained redirect aliases before giving up
const MAX_REDIRECT_HOPS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Redirect loop while resolving {0}")]
    RedirectLoop(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

/// Anything that can move the user to another location
pub trait Navigator: Send + Sync {
    fn current_location(&self) -> Location;

    fn navigate(&self, to: Location);

    /// Where an expired session is sent
    fn login_location(&self) -> Location {
        Location::new(LOGIN_PATH)
    }
}

pub struct Router {
    routes: RouteTable,
    session: SessionStore,
    current: Mutex<Location>,
}

impl Router {
    pub fn new(routes: RouteTable, session: SessionStore) -> Self {
        Self {
            routes,
            session,
            current: Mutex::new(Location::new("/")),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn current(&self) -> Location {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Follow redirect aliases until a concrete route is reached.
    /// The query of the original location is kept.
    pub fn resolve<'a>(&'a self, to: &Location) -> Result<(&'a Route, Location), RouteError> {
        let mut location = to.clone();
        for _ in 0..=MAX_REDIRECT_HOPS {
            let route = self
                .routes
                .find(&location.path)
                .ok_or_else(|| RouteError::NotFound(location.path.clone()))?;
            match route.redirect {
                Some(ref target) => {
                    debug!(from = %location.path, to = %target, "Following route alias");
                    location.path = target.clone();
                }
                None => return Ok((route, location)),
            }
        }
        Err(RouteError::RedirectLoop(to.path.clone()))
    }

    /// Decide where a navigation to `to` ends up, without moving
    pub fn check(&self, to: &Location) -> Result<GuardDecision, RouteError> {
        let (route, target) = self.resolve(to)?;
        let has_credential = self.session.is_logged_in();
        Ok(evaluate(route, &target, has_credential, self.routes.login_path()))
    }

    /// Navigate to `to`, applying the guard. Returns where the user landed.
    pub fn push(&self, to: Location) -> Result<Location, RouteError> {
        let landed = match self.check(&to)? {
            GuardDecision::Allowed(location) => location,
            GuardDecision::Redirected(login) => {
                info!(from = %to, to = %login, "Protected route, redirecting to login");
                // The login route itself is never protected
                let (_, login) = self.resolve(&login)?;
                login
            }
        };

        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = landed.clone();
        Ok(landed)
    }

    /// Parse `path` (with optional query) and navigate to it
    pub fn push_path(&self, path: &str) -> Result<Location, RouteError> {
        self.push(Location::parse(path)?)
    }
}

impl Navigator for Router {
    fn current_location(&self) -> Location {
        self.current()
    }

    fn navigate(&self, to: Location) {
        if let Err(e) = self.push(to) {
            warn!(error = %e, "Navigation failed");
        }
    }

    fn login_location(&self) -> Location {
        Location::new(self.routes.login_path())
    }
}

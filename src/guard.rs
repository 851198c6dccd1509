//! Route access control.
//!
//! The guard is a small state machine that sits between navigation and
//! rendering. While the persisted session is being checked it reports
//! [`AuthState::Checking`] and callers render a neutral loading view; once
//! resolved it either allows the requested route or yields exactly one
//! redirect target.

/// Session check status as seen by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// The persisted session has not been inspected yet.
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Navigable views of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Dashboard,
    Tasks,
    TaskDetail(i64),
    Profile,
}

impl Route {
    /// Routes reachable without a session.
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Route::Landing | Route::SignIn | Route::SignUp)
    }

    /// Sign-in and sign-up are pointless once a session exists.
    #[must_use]
    pub fn is_auth_entry(self) -> bool {
        matches!(self, Route::SignIn | Route::SignUp)
    }
}

/// Decides route access from the current [`AuthState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    state: AuthState,
    route: Route,
}

impl RouteGuard {
    /// A guard for `initial` with the session check still pending.
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            state: AuthState::Checking,
            route: initial,
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn is_checking(&self) -> bool {
        self.state == AuthState::Checking
    }

    /// Record the session check result and return the redirect, if any.
    ///
    /// Unauthenticated visitors on a protected route are sent to sign-in;
    /// authenticated visitors on sign-in or sign-up are sent to the
    /// dashboard. Everyone else stays where they are. A returned redirect
    /// has already been applied to the guard's current route, so resolving
    /// the same state again yields no further redirect.
    pub fn resolve(&mut self, authenticated: bool) -> Option<Route> {
        self.state = if authenticated {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        };
        let target = self.redirect_target()?;
        self.route = target;
        Some(target)
    }

    /// Move to `route`, re-evaluating access under the known state.
    ///
    /// Returns the route actually landed on. While still checking, the
    /// navigation is taken at face value and re-checked on `resolve`.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.route = route;
        if self.state != AuthState::Checking {
            if let Some(target) = self.redirect_target() {
                self.route = target;
            }
        }
        self.route
    }

    /// Forget the last check result, e.g. after logout or session expiry.
    pub fn refresh(&mut self) {
        self.state = AuthState::Checking;
    }

    fn redirect_target(&self) -> Option<Route> {
        match self.state {
            AuthState::Checking => None,
            AuthState::Unauthenticated if !self.route.is_public() => Some(Route::SignIn),
            AuthState::Authenticated if self.route.is_auth_entry() => Some(Route::Dashboard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_checking_with_no_redirect() {
        let guard = RouteGuard::new(Route::Dashboard);
        assert!(guard.is_checking());
        assert_eq!(guard.state(), AuthState::Checking);
    }

    #[test]
    fn unauthenticated_protected_route_redirects_to_sign_in() {
        let mut guard = RouteGuard::new(Route::Dashboard);
        assert_eq!(guard.resolve(false), Some(Route::SignIn));
        assert_eq!(guard.route(), Route::SignIn);
    }

    #[test]
    fn unauthenticated_public_route_stays_put() {
        let mut guard = RouteGuard::new(Route::Landing);
        assert_eq!(guard.resolve(false), None);
        assert_eq!(guard.route(), Route::Landing);
    }

    #[test]
    fn authenticated_sign_in_redirects_to_dashboard() {
        let mut guard = RouteGuard::new(Route::SignIn);
        assert_eq!(guard.resolve(true), Some(Route::Dashboard));
    }

    #[test]
    fn authenticated_protected_route_is_allowed() {
        let mut guard = RouteGuard::new(Route::TaskDetail(7));
        assert_eq!(guard.resolve(true), None);
        assert_eq!(guard.route(), Route::TaskDetail(7));
    }

    #[test]
    fn navigate_enforces_known_state() {
        let mut guard = RouteGuard::new(Route::Landing);
        guard.resolve(false);
        assert_eq!(guard.navigate(Route::Profile), Route::SignIn);
        assert_eq!(guard.navigate(Route::SignUp), Route::SignUp);
    }

    #[test]
    fn refresh_returns_to_checking() {
        let mut guard = RouteGuard::new(Route::Dashboard);
        guard.resolve(true);
        guard.refresh();
        assert!(guard.is_checking());
    }
}

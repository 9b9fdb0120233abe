//! Session state owned by the navigation layer.

use taskflow_access::SessionUser;

use crate::redirect::{with_redirect_query, REDIRECT_PARAM};
use crate::Location;

/// Pages that are part of the sign-in flow itself.
pub const AUTH_PAGES: [&str; 3] = ["/login", "/signup", "/callback"];

/// Current user plus whether route guards may run yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    user: Option<SessionUser>,
    initialized: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&mut self, user: SessionUser) {
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
    }

    pub fn set_initialized(&mut self, initialized: bool) {
        self.initialized = initialized;
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// True when the path belongs to the sign-in flow.
///
/// Substring match, so `/login/sso` also counts.
pub fn is_auth_page(pathname: &str) -> bool {
    AUTH_PAGES.iter().any(|page| pathname.contains(page))
}

/// Where to go once the identity SDK has reported the session.
///
/// Signed in: honour a `redirect` query parameter, else leave the auth pages
/// for `/`. Signed out: send anything but an auth page to the login page,
/// remembering the origin. `None` means stay.
pub fn post_auth_target(user: Option<&SessionUser>, current: &Location) -> Option<String> {
    let on_auth_page = is_auth_page(current.pathname());

    match user {
        Some(_) => match current.query_param(REDIRECT_PARAM) {
            Some(target) if !target.is_empty() => Some(target),
            _ if on_auth_page => Some("/".to_string()),
            _ => None,
        },
        None if on_auth_page => None,
        None => Some(with_redirect_query("/login", current)),
    }
}

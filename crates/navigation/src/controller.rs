//! Navigation controller: the two-gate startup sequence and per-navigation
//! route guarding.
//!
//! Gate 1 (`is_ready`) opens once the identity SDK has answered, successfully
//! or not, or turned out not to be loaded at all; until then the shell shows a
//! loading state. Gate 2 (`AuthState::is_initialized`) enables route guards.
//! Both open together, but guards never run before the session is known.

use taskflow_access::SessionUser;

use crate::auth::post_auth_target;
use crate::client::{ClientError, IdentitySdk, SdkError};
use crate::{AuthState, Location, RouteGuard};

/// What happened when the controller asked the SDK for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The SDK is loaded but no client could be obtained; both gates remain
    /// closed and initialization can be retried.
    ClientUnavailable(ClientError),
    /// The SDK is missing entirely; gates are open and the user is signed out.
    SdkNotLoaded,
    /// Session known; optionally navigate somewhere.
    Ready { navigate_to: Option<String> },
    /// The SDK reported an error; gates are open and the user is signed out.
    Failed(SdkError),
}

#[derive(Debug, Default)]
pub struct NavigationController {
    guard: RouteGuard,
    auth: AuthState,
    ready: bool,
}

impl NavigationController {
    pub fn new(guard: RouteGuard) -> Self {
        Self {
            guard,
            auth: AuthState::new(),
            ready: false,
        }
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Gate 1: the session has been resolved one way or the other.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Resolve the session through the SDK client.
    ///
    /// `client` is the result of obtaining the client, typically
    /// `slot.get_or_init(..).as_deref()`. A missing SDK opens both gates
    /// signed out without any post-authentication navigation; any other
    /// client error leaves the gates closed.
    pub fn initialize<S: IdentitySdk + ?Sized>(
        &mut self,
        client: Result<&S, &ClientError>,
        current: &Location,
    ) -> InitOutcome {
        let sdk = match client {
            Ok(sdk) => sdk,
            Err(ClientError::SdkNotLoaded) => {
                tracing::error!("auth initialization failed: identity sdk not loaded");
                self.open_gates();
                self.auth.clear_user();
                return InitOutcome::SdkNotLoaded;
            }
            Err(err) => {
                tracing::error!(error = %err, "identity client not available");
                return InitOutcome::ClientUnavailable(err.clone());
            }
        };

        match sdk.get_session() {
            Ok(user) => InitOutcome::Ready {
                navigate_to: self.on_auth_success(user, current),
            },
            Err(err) => {
                self.on_auth_error(&err);
                InitOutcome::Failed(err)
            }
        }
    }

    /// SDK reported a (possibly absent) user. Opens both gates and returns the
    /// post-authentication navigation target, if any.
    pub fn on_auth_success(&mut self, user: Option<SessionUser>, current: &Location) -> Option<String> {
        self.open_gates();

        match user {
            Some(user) => self.auth.set_user(user),
            None => self.auth.clear_user(),
        }

        let target = post_auth_target(self.auth.user(), current);
        if let Some(target) = &target {
            tracing::debug!(from = %current, to = %target, "post-authentication navigation");
        }
        target
    }

    pub fn on_auth_error(&mut self, err: &SdkError) {
        tracing::error!(error = %err, "authentication failed");
        self.open_gates();
        self.auth.clear_user();
    }

    /// Sign in through the SDK and navigate as after initialization.
    pub fn login<S: IdentitySdk + ?Sized>(&mut self, sdk: &S, current: &Location) -> Result<Option<String>, SdkError> {
        match sdk.login() {
            Ok(user) => Ok(self.on_auth_success(Some(user), current)),
            Err(err) => {
                self.on_auth_error(&err);
                Err(err)
            }
        }
    }

    /// Guard a navigation. Returns the redirect URL when access is denied;
    /// does nothing until guards are enabled.
    pub fn on_navigation(&self, location: &Location) -> Option<String> {
        if !self.auth.is_initialized() {
            tracing::debug!(path = %location.pathname(), "route guards not enabled yet");
            return None;
        }

        self.guard.evaluate(location, self.auth.user()).redirect
    }

    /// Sign out. On success the user is cleared and sent to `/login`; on
    /// failure the error is logged and nothing changes.
    pub fn logout<S: IdentitySdk + ?Sized>(&mut self, sdk: &S) -> Option<String> {
        match sdk.logout() {
            Ok(()) => {
                self.auth.clear_user();
                Some("/login".to_string())
            }
            Err(err) => {
                tracing::error!(error = %err, "logout failed");
                None
            }
        }
    }

    fn open_gates(&mut self) {
        self.ready = true;
        self.auth.set_initialized(true);
    }
}

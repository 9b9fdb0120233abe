//! `taskflow-navigation` — navigation control around route access checks.
//!
//! Owns the session state, the identity SDK boundary, redirect URLs and the
//! application's route list. Access decisions come from `taskflow-access`.

pub mod auth;
pub mod client;
pub mod controller;
pub mod guard;
pub mod location;
pub mod redirect;
pub mod routes;

pub use auth::{is_auth_page, post_auth_target, AuthState};
pub use client::{ClientConfig, ClientError, ClientSlot, IdentitySdk, SdkError};
pub use controller::{InitOutcome, NavigationController};
pub use guard::{GuardOutcome, RouteGuard};
pub use location::Location;
pub use redirect::{redirect_url, with_redirect_query};
pub use routes::{create_route, AppRoute, AppRoutes, RoutePath};

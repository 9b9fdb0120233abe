//! `taskflow-access` — route access evaluation (pure, no IO).
//!
//! Given a navigation path, a route table and the current session, this crate
//! decides whether the navigation is allowed and, if not, where to redirect.
//! Redirecting itself is left to the navigation layer.

pub mod condition;
pub mod config;
pub mod pattern;
pub mod session;
pub mod table;
pub mod verify;

pub use condition::{evaluate_condition, Condition, ConditionOutcome, Rule};
pub use config::{AccessRule, Operator, RouteAccessConfig, When, DEFAULT_REDIRECT};
pub use pattern::{matches_pattern, specificity, RoutePattern};
pub use session::SessionUser;
pub use table::{RouteTable, RouteTableError};
pub use verify::{verify_route_access, AccessDecision};

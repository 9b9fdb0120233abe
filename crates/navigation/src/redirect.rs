//! Redirect URL construction for denied navigations.

use taskflow_access::{AccessDecision, DEFAULT_REDIRECT};

use crate::Location;

/// Query parameter that carries the originally requested location.
pub const REDIRECT_PARAM: &str = "redirect";

/// `target?redirect=<encoded path+query of origin>`.
pub fn with_redirect_query(target: &str, origin: &Location) -> String {
    format!(
        "{target}?{REDIRECT_PARAM}={}",
        urlencoding::encode(&origin.path_and_query())
    )
}

/// Where a decision sends the user, or `None` when access is allowed.
pub fn redirect_url(decision: &AccessDecision, origin: &Location) -> Option<String> {
    if decision.allowed {
        return None;
    }

    let target = decision.redirect_to.as_deref().unwrap_or(DEFAULT_REDIRECT);
    if decision.exclude_redirect_query {
        Some(target.to_string())
    } else {
        Some(with_redirect_query(target, origin))
    }
}

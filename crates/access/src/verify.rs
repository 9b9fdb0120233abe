use serde::Serialize;

use crate::condition::evaluate_condition;
use crate::{Operator, RouteAccessConfig, SessionUser};

/// Outcome of checking one navigation against its route config.
///
/// `redirect_to` is `None` exactly when `allowed` is true. `failed` lists the
/// label of every condition that did not pass, in config order, even when the
/// operator still allowed access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub allowed: bool,
    pub redirect_to: Option<String>,
    pub exclude_redirect_query: bool,
    pub failed: Vec<String>,
}

impl AccessDecision {
    pub fn allow(failed: Vec<String>) -> Self {
        Self {
            allowed: true,
            redirect_to: None,
            exclude_redirect_query: false,
            failed,
        }
    }

    pub fn deny(redirect_to: impl Into<String>, exclude_redirect_query: bool, failed: Vec<String>) -> Self {
        Self {
            allowed: false,
            redirect_to: Some(redirect_to.into()),
            exclude_redirect_query,
            failed,
        }
    }
}

/// Decide whether the session may access a route.
///
/// - No config, no `allow` block or no conditions: allowed (fail open on
///   absent configuration only).
/// - Every condition is evaluated; `AND` needs all to pass, `OR` needs one.
/// - Denials redirect to `redirectOnDeny`, or `/login` when unset.
pub fn verify_route_access(config: Option<&RouteAccessConfig>, user: Option<&SessionUser>) -> AccessDecision {
    let Some(rule) = config.and_then(|c| c.allow.as_ref()) else {
        return AccessDecision::allow(Vec::new());
    };

    if rule.conditions().is_empty() {
        return AccessDecision::allow(Vec::new());
    }

    let results: Vec<_> = rule
        .conditions()
        .iter()
        .map(|condition| evaluate_condition(condition, user))
        .collect();

    let allowed = match rule.operator() {
        Operator::Or => results.iter().any(|r| r.passed),
        Operator::And => results.iter().all(|r| r.passed),
    };

    let failed: Vec<String> = results
        .into_iter()
        .filter(|r| !r.passed)
        .map(|r| r.label)
        .collect();

    if allowed {
        AccessDecision::allow(failed)
    } else {
        tracing::debug!(failed = ?failed, redirect_to = %rule.redirect_target(), "route access denied");
        AccessDecision::deny(rule.redirect_target(), rule.excludes_redirect_query(), failed)
    }
}

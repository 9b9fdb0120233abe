//! Route access configuration.
//!
//! The serde shape mirrors a `routes.json` document:
//!
//! ```json
//! {
//!   "allow": {
//!     "when": {
//!       "conditions": [{ "label": "Today page requires authentication", "rule": "authenticated" }],
//!       "operator": "AND"
//!     },
//!     "redirectOnDeny": "/login",
//!     "excludeRedirectQuery": false
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::Condition;

/// Redirect target used when a denying config does not name one.
pub const DEFAULT_REDIRECT: &str = "/login";

/// How a condition list is combined.
///
/// Anything other than `"OR"` reads as `AND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl From<String> for Operator {
    fn from(value: String) -> Self {
        if value == "OR" { Operator::Or } else { Operator::And }
    }
}

impl From<Operator> for String {
    fn from(value: Operator) -> Self {
        match value {
            Operator::And => "AND".to_string(),
            Operator::Or => "OR".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct When {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub operator: Operator,
}

/// The `allow` block of a route config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    #[serde(default)]
    pub when: When,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_on_deny: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_redirect_query: Option<bool>,
}

impl AccessRule {
    /// All conditions must pass.
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self {
            when: When {
                conditions,
                operator: Operator::And,
            },
            ..Self::default()
        }
    }

    /// At least one condition must pass.
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self {
            when: When {
                conditions,
                operator: Operator::Or,
            },
            ..Self::default()
        }
    }

    pub fn with_redirect_on_deny(mut self, target: impl Into<String>) -> Self {
        self.redirect_on_deny = Some(target.into());
        self
    }

    pub fn with_exclude_redirect_query(mut self, exclude: bool) -> Self {
        self.exclude_redirect_query = Some(exclude);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.when.conditions
    }

    pub fn operator(&self) -> Operator {
        self.when.operator
    }

    pub fn redirect_target(&self) -> &str {
        self.redirect_on_deny.as_deref().unwrap_or(DEFAULT_REDIRECT)
    }

    pub fn excludes_redirect_query(&self) -> bool {
        self.exclude_redirect_query.unwrap_or(false)
    }
}

/// Access configuration attached to one route pattern.
///
/// A config without an `allow` block places no restriction on the route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteAccessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<AccessRule>,
}

impl RouteAccessConfig {
    pub fn allow(rule: AccessRule) -> Self {
        Self { allow: Some(rule) }
    }

    pub fn unrestricted() -> Self {
        Self { allow: None }
    }
}

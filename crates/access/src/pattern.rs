use std::borrow::Cow;

use serde::{Deserialize, Serialize};

const DEEP_WILDCARD: &str = "/**/*";
const SINGLE_WILDCARD: &str = "/*";

/// Route pattern (e.g. "/today", "/category/:id", "/priority/*").
///
/// Patterns are opaque strings at this layer; see [`matches_pattern`] for the
/// supported forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePattern(Cow<'static, str>);

impl RoutePattern {
    pub fn new(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, path: &str) -> bool {
        matches_pattern(path, self.as_str())
    }

    pub fn specificity(&self) -> i32 {
        specificity(self.as_str())
    }

    /// True when the pattern has no parameters and no wildcards.
    pub fn is_literal(&self) -> bool {
        is_literal(self.as_str())
    }
}

impl core::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for RoutePattern {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

/// Check whether a concrete path matches a route pattern.
///
/// Forms, in precedence order:
/// - exact equality
/// - deep wildcard `base/**/*`: any path starting with `base`
/// - single wildcard `base/*`: `base` followed by exactly one more segment
/// - parameters `/a/:id`: same segment count, `:` segments match anything
pub fn matches_pattern(path: &str, pattern: &str) -> bool {
    if path == pattern {
        return true;
    }

    if let Some(base) = pattern.strip_suffix(DEEP_WILDCARD) {
        return path.starts_with(base);
    }

    if let Some(base) = pattern.strip_suffix(SINGLE_WILDCARD) {
        return match path.strip_prefix(base).and_then(|rest| rest.strip_prefix('/')) {
            Some(segment) => !segment.is_empty() && !segment.contains('/'),
            None => false,
        };
    }

    if pattern.contains(':') {
        let pattern_parts: Vec<&str> = pattern.split('/').collect();
        let path_parts: Vec<&str> = path.split('/').collect();

        if pattern_parts.len() != path_parts.len() {
            return false;
        }

        return pattern_parts
            .iter()
            .zip(&path_parts)
            .all(|(part, actual)| part.starts_with(':') || part == actual);
    }

    false
}

/// Specificity score used to rank patterns that match the same path.
///
/// Higher is more specific. Literal patterns get a large bonus, each segment
/// adds 10, each parameter costs 5 and wildcards cost 50 (single) or 100 (deep).
pub fn specificity(pattern: &str) -> i32 {
    let mut score = 0i32;

    if is_literal(pattern) {
        score += 1000;
    }

    score += pattern.split('/').count() as i32 * 10;
    score -= pattern.matches(':').count() as i32 * 5;

    if pattern.contains(DEEP_WILDCARD) {
        score -= 100;
    } else if pattern.contains(SINGLE_WILDCARD) {
        score -= 50;
    }

    score
}

fn is_literal(pattern: &str) -> bool {
    !pattern.contains(':') && !pattern.contains('*')
}

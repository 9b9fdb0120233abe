use std::collections::HashSet;

use thiserror::Error;

use crate::{AccessRule, Condition, RouteAccessConfig, RoutePattern};

#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("route table is not a valid JSON object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid access config for route '{pattern}': {source}")]
    InvalidConfig {
        pattern: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("route pattern '{0}' must start with '/'")]
    InvalidPattern(String),

    #[error("duplicate route pattern '{0}'")]
    DuplicatePattern(String),
}

/// Ordered, read-only mapping from route pattern to access config.
///
/// Table order breaks specificity ties, so it is preserved exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    entries: Vec<(RoutePattern, RouteAccessConfig)>,
}

impl RouteTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(pattern, config)` pairs, keeping their order.
    pub fn from_entries<I>(entries: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (RoutePattern, RouteAccessConfig)>,
    {
        let mut seen: HashSet<RoutePattern> = HashSet::new();
        let mut out = Vec::new();

        for (pattern, config) in entries {
            if !pattern.as_str().starts_with('/') {
                return Err(RouteTableError::InvalidPattern(pattern.to_string()));
            }
            if !seen.insert(pattern.clone()) {
                return Err(RouteTableError::DuplicatePattern(pattern.to_string()));
            }
            out.push((pattern, config));
        }

        Ok(Self { entries: out })
    }

    /// Parse a `routes.json` document (object keyed by pattern).
    pub fn from_json(json: &str) -> Result<Self, RouteTableError> {
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(document.len());
        for (pattern, value) in document {
            let config: RouteAccessConfig = serde_json::from_value(value).map_err(|source| {
                RouteTableError::InvalidConfig {
                    pattern: pattern.clone(),
                    source,
                }
            })?;
            entries.push((RoutePattern::new(pattern), config));
        }

        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoutePattern, &RouteAccessConfig)> {
        self.entries.iter().map(|(p, c)| (p, c))
    }

    /// Config stored under a pattern, compared literally.
    pub fn get(&self, pattern: &str) -> Option<&RouteAccessConfig> {
        self.entries
            .iter()
            .find(|(p, _)| p.as_str() == pattern)
            .map(|(_, c)| c)
    }

    /// Best-matching config for a path, or `None` when no pattern applies.
    ///
    /// A literal key equal to the path always wins. Otherwise the matching
    /// pattern with the highest specificity wins; ties go to the earlier entry.
    pub fn resolve(&self, path: &str) -> Option<&RouteAccessConfig> {
        self.resolve_entry(path).map(|(_, config)| config)
    }

    /// Like [`RouteTable::resolve`], also returning the winning pattern.
    pub fn resolve_entry(&self, path: &str) -> Option<(&RoutePattern, &RouteAccessConfig)> {
        if let Some((pattern, config)) = self.entries.iter().find(|(p, _)| p.as_str() == path) {
            tracing::debug!(path, pattern = %pattern, "route resolved by exact key");
            return Some((pattern, config));
        }

        let mut best: Option<(i32, &RoutePattern, &RouteAccessConfig)> = None;
        for (pattern, config) in &self.entries {
            if !pattern.matches(path) {
                continue;
            }
            let score = pattern.specificity();
            match best {
                Some((top, _, _)) if top >= score => {}
                _ => best = Some((score, pattern, config)),
            }
        }

        match best {
            Some((score, pattern, config)) => {
                tracing::debug!(path, pattern = %pattern, score, "route resolved by pattern");
                Some((pattern, config))
            }
            None => {
                tracing::debug!(path, "no route access config; unrestricted");
                None
            }
        }
    }

    /// The task manager's built-in route table.
    ///
    /// Auth pages are public; task views require a session and send anonymous
    /// visitors to `/login`.
    pub fn builtin() -> Self {
        fn public(label: &str) -> RouteAccessConfig {
            RouteAccessConfig::allow(AccessRule::any(vec![Condition::public(label)]))
        }

        fn authenticated(label: &str) -> RouteAccessConfig {
            RouteAccessConfig::allow(
                AccessRule::all(vec![Condition::authenticated(label)]).with_redirect_on_deny("/login"),
            )
        }

        let entries = vec![
            (
                RoutePattern::from("/"),
                RouteAccessConfig::allow(
                    AccessRule::all(vec![Condition::authenticated("Homepage requires authentication")])
                        .with_redirect_on_deny("/login")
                        .with_exclude_redirect_query(false),
                ),
            ),
            (RoutePattern::from("/login"), public("Login page is public")),
            (RoutePattern::from("/signup"), public("Signup page is public")),
            (RoutePattern::from("/callback"), public("Callback page is public")),
            (RoutePattern::from("/error"), public("Error page is public")),
            (RoutePattern::from("/prompt-password/*"), public("Prompt password is public")),
            (RoutePattern::from("/reset-password/*"), public("Reset password is public")),
            (
                RoutePattern::from("/category/*"),
                authenticated("Category pages require authentication"),
            ),
            (
                RoutePattern::from("/priority/*"),
                authenticated("Priority pages require authentication"),
            ),
            (RoutePattern::from("/overdue"), authenticated("Overdue page requires authentication")),
            (RoutePattern::from("/today"), authenticated("Today page requires authentication")),
            (RoutePattern::from("/upcoming"), authenticated("Upcoming page requires authentication")),
            (
                RoutePattern::from("/completed"),
                authenticated("Completed page requires authentication"),
            ),
        ];

        Self { entries }
    }
}

use taskflow_access::{verify_route_access, AccessDecision, RouteTable, SessionUser};

use crate::redirect::redirect_url;
use crate::Location;

/// Result of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub decision: AccessDecision,
    /// Full redirect URL (with `redirect` query unless excluded) when denied.
    pub redirect: Option<String>,
}

/// Route guard: resolves the access config for a location and verifies it.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn builtin() -> Self {
        Self::new(RouteTable::builtin())
    }

    /// Load a `routes.json` document.
    ///
    /// A malformed document is logged and replaced by an empty table, so
    /// every path then resolves as unrestricted.
    pub fn from_json_or_empty(json: &str) -> Self {
        match RouteTable::from_json(json) {
            Ok(table) => Self::new(table),
            Err(err) => {
                tracing::error!(error = %err, "failed to load route table; guarding with an empty table");
                Self::new(RouteTable::empty())
            }
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn evaluate(&self, location: &Location, user: Option<&SessionUser>) -> GuardOutcome {
        let config = self.table.resolve(location.pathname());
        let decision = verify_route_access(config, user);
        let redirect = redirect_url(&decision, location);

        if let Some(target) = &redirect {
            tracing::info!(
                path = %location.pathname(),
                redirect = %target,
                failed = ?decision.failed,
                "navigation denied"
            );
        }

        GuardOutcome { decision, redirect }
    }
}

use serde::{Deserialize, Serialize};

use crate::SessionUser;

/// Built-in access predicates.
///
/// The set is closed: there is no registry for user-defined predicates. Rule
/// names that are not recognised are kept as [`Rule::Unknown`] so a table can
/// still be loaded; they never pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rule {
    Public,
    Authenticated,
    Unknown(String),
}

impl Rule {
    pub fn as_str(&self) -> &str {
        match self {
            Rule::Public => "public",
            Rule::Authenticated => "authenticated",
            Rule::Unknown(name) => name,
        }
    }
}

impl From<&str> for Rule {
    fn from(value: &str) -> Self {
        match value {
            "public" => Rule::Public,
            "authenticated" => Rule::Authenticated,
            other => Rule::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Rule {
    fn from(value: String) -> Self {
        match value.as_str() {
            "public" => Rule::Public,
            "authenticated" => Rule::Authenticated,
            _ => Rule::Unknown(value),
        }
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        match value {
            Rule::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named predicate plus the label reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub label: String,
    pub rule: Rule,
}

impl Condition {
    pub fn new(label: impl Into<String>, rule: Rule) -> Self {
        Self {
            label: label.into(),
            rule,
        }
    }

    pub fn public(label: impl Into<String>) -> Self {
        Self::new(label, Rule::Public)
    }

    pub fn authenticated(label: impl Into<String>) -> Self {
        Self::new(label, Rule::Authenticated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionOutcome {
    pub passed: bool,
    pub label: String,
}

/// Evaluate one condition against the current session.
///
/// Unknown rules fail closed and are logged as a configuration warning.
pub fn evaluate_condition(condition: &Condition, user: Option<&SessionUser>) -> ConditionOutcome {
    let passed = match &condition.rule {
        Rule::Public => true,
        Rule::Authenticated => user.is_some(),
        Rule::Unknown(name) => {
            tracing::warn!(rule = %name, label = %condition.label, "unknown route access rule");
            false
        }
    };

    ConditionOutcome {
        passed,
        label: condition.label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, logs.contents())
    }

    fn user() -> SessionUser {
        SessionUser::new(json!({ "userId": 1 }))
    }

    #[test]
    fn public_always_passes() {
        let c = Condition::public("Login page is public");
        assert!(evaluate_condition(&c, None).passed);
        assert!(evaluate_condition(&c, Some(&user())).passed);
    }

    #[test]
    fn authenticated_requires_a_session() {
        let c = Condition::authenticated("Today page requires authentication");
        let denied = evaluate_condition(&c, None);
        assert!(!denied.passed);
        assert_eq!(denied.label, "Today page requires authentication");
        assert!(evaluate_condition(&c, Some(&user())).passed);
    }

    #[test]
    fn unknown_rule_fails_closed_even_with_session() {
        let c = Condition::new("Admins only", Rule::from("admin"));
        assert_eq!(c.rule, Rule::Unknown("admin".to_string()));
        let outcome = evaluate_condition(&c, Some(&user()));
        assert!(!outcome.passed);
        assert_eq!(outcome.label, "Admins only");
    }

    #[test]
    fn unknown_rule_is_logged_as_warning() {
        let c = Condition::new("Admins only", Rule::from("admin"));
        let (outcome, logs) = with_captured_logs(|| evaluate_condition(&c, None));
        assert!(!outcome.passed);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("unknown route access rule"), "{logs}");
        assert!(logs.contains("rule=admin"), "{logs}");
    }

    #[test]
    fn known_rules_log_nothing_above_debug() {
        let (_, logs) = with_captured_logs(|| {
            evaluate_condition(&Condition::public("open"), None);
            evaluate_condition(&Condition::authenticated("auth"), None);
        });
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn rule_deserializes_from_plain_strings() {
        let c: Condition =
            serde_json::from_value(json!({ "label": "x", "rule": "authenticated" })).unwrap();
        assert_eq!(c.rule, Rule::Authenticated);

        let c: Condition = serde_json::from_value(json!({ "label": "x", "rule": "isAdmin" })).unwrap();
        assert_eq!(c.rule, Rule::Unknown("isAdmin".to_string()));
        assert_eq!(serde_json::to_value(&c.rule).unwrap(), json!("isAdmin"));
    }
}

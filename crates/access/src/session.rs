use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the identity SDK.
///
/// The shape belongs to the SDK; access evaluation only cares whether a
/// session is present (`Option<&SessionUser>`), never what it contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionUser(serde_json::Value);

impl SessionUser {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Convenience lookup of a top-level string field (e.g. "emailAddress").
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_str())
    }
}

impl From<serde_json::Value> for SessionUser {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_reads_top_level_strings() {
        let user = SessionUser::new(json!({ "emailAddress": "a@b.com", "id": 7 }));
        assert_eq!(user.field("emailAddress"), Some("a@b.com"));
        assert_eq!(user.field("id"), None);
        assert_eq!(user.field("missing"), None);
    }

    #[test]
    fn serializes_transparently() {
        let user: SessionUser = serde_json::from_str(r#"{"name":"sam"}"#).unwrap();
        assert_eq!(user.as_value(), &json!({ "name": "sam" }));
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"name":"sam"}"#);
    }
}

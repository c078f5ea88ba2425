//! Response payloads for the users endpoints.

use serde::Serialize;
use serde_json::{Map, Value};

/// Generic JSON object as decoded from create/update bodies
pub type JsonObject = Map<String, Value>;

/// User identifier
///
/// The fixed list uses numbers while anything taken from the request path
/// stays a string, so both shapes appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(u64),
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn john(id: UserId) -> Self {
        Self {
            id,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    pub fn jane(id: UserId) -> Self {
        Self {
            id,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
        }
    }

    /// The two records returned by the list endpoint
    pub fn examples() -> Vec<Self> {
        vec![Self::john(UserId::Numeric(1)), Self::jane(UserId::Numeric(2))]
    }
}

/// `{"data": ..., "message": ...}`
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    pub data: T,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeletedUser<'a> {
    pub message: &'static str,
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_shapes() {
        let numeric = serde_json::to_value(User::john(UserId::Numeric(1))).unwrap();
        assert_eq!(numeric["id"], serde_json::json!(1));

        let path = serde_json::to_value(User::john(UserId::Path("42".to_string()))).unwrap();
        assert_eq!(path["id"], serde_json::json!("42"));
    }

    #[test]
    fn test_examples() {
        let users = User::examples();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, UserId::Numeric(1));
        assert_eq!(users[1].name, "Jane Smith");
        assert_eq!(users[1].email, "jane@example.com");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user. The id doubles as the session cookie value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_generates_unique_ids() {
        let a = User::new("Alice", "alice@example.com");
        let b = User::new("Alice", "alice@example.com");

        assert_eq!(a.name, "Alice");
        assert_eq!(a.email, "alice@example.com");
        assert_ne!(a.id, b.id);
    }
}

use serde::Serialize;
use serde_json::Value;

/// Core User entity - represents one account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64, // 0 until the store assigns one
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl User {
    pub fn new(name: String, email: String, age: i64) -> Self {
        Self {
            id: 0,
            name,
            email,
            age,
        }
    }

    /// Build a user from a draft, defaulting every absent field.
    /// The draft's id is never carried over.
    pub fn from_draft(draft: &UserDraft) -> Self {
        Self::new(
            draft.name.clone().unwrap_or_default(),
            draft.email.clone().unwrap_or_default(),
            draft.age.unwrap_or_default(),
        )
    }

    pub fn is_valid(&self) -> bool {
        is_valid_fields(&self.name, &self.email, self.age)
    }
}

/// Decoded, not yet validated request body.
///
/// Produced by a lenient decode: absent keys, keys of the wrong JSON type and
/// non-object payloads all leave the matching field as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl UserDraft {
    pub fn from_json(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };

        Self {
            id: fields.get("id").and_then(Value::as_u64),
            name: fields.get("name").and_then(Value::as_str).map(str::to_string),
            email: fields.get("email").and_then(Value::as_str).map(str::to_string),
            age: fields.get("age").and_then(Value::as_i64),
        }
    }

    /// Validity of the user this draft would produce once defaults are applied.
    pub fn is_valid(&self) -> bool {
        is_valid_fields(
            self.name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.age.unwrap_or_default(),
        )
    }
}

fn is_valid_fields(name: &str, email: &str, age: i64) -> bool {
    !name.is_empty() && !email.is_empty() && email.contains('@') && age > 0
}

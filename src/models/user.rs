use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,
    pub email: String,

    // bcrypt hash; empty for accounts created through an OAuth provider
    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub is_verified: bool,

    #[serde(default, rename = "isOAuth")]
    pub is_oauth: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

/// The part of a user that request handlers get to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub email: String,
    pub name: String,
}

impl From<User> for CurrentUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_record_field_names() {
        let u = User {
            id: ObjectId::new(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "$2b$12$hash".into(),
            is_verified: true,
            is_oauth: false,
            created_at: 1_700_000_000,
            updated_at: 1_700_000_100,
        };

        let v = serde_json::to_value(&u).unwrap();
        let keys = [
            "_id", "name", "email", "password", "isVerified", "isOAuth", "createdAt", "updatedAt",
        ];
        for key in keys {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert!(v.get("is_oauth").is_none());
    }

    #[test]
    fn current_user_drops_password() {
        let u = User {
            id: ObjectId::new(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret-hash".into(),
            is_verified: false,
            is_oauth: true,
            created_at: 0,
            updated_at: 0,
        };
        let id = u.id;
        let cu = CurrentUser::from(u);
        assert_eq!(cu.id, id);
        assert_eq!(cu.name, "Ada");
        assert!(!serde_json::to_string(&cu).unwrap().contains("secret-hash"));
    }
}

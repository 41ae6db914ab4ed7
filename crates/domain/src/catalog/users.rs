use common::UserId;
use serde::{Deserialize, Serialize};
use store::Store;

use crate::database::PosDatabase;

/// What a staff member is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cashier,
    Kitchen,
    Admin,
}

/// A staff account as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub mobile: String,
    pub pin: String,
    pub role: Role,
    pub name: String,
}

/// A staff account as returned to clients. Never carries the pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub mobile: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
            mobile: user.mobile.clone(),
        }
    }
}

/// Read access to staff accounts.
#[derive(Clone)]
pub struct UserDirectory {
    store: Store<PosDatabase>,
}

impl UserDirectory {
    pub fn new(store: Store<PosDatabase>) -> Self {
        Self { store }
    }

    /// Looks up the account matching both credentials.
    pub async fn authenticate(&self, mobile: &str, pin: &str) -> Option<UserProfile> {
        self.store
            .read(|db| {
                db.users
                    .iter()
                    .find(|u| u.mobile == mobile && u.pin == pin)
                    .map(UserProfile::from)
            })
            .await
    }

    pub async fn find(&self, id: UserId) -> Option<UserProfile> {
        self.store
            .read(|db| db.users.iter().find(|u| u.id == id).map(UserProfile::from))
            .await
    }
}

/// Staff accounts a fresh database starts with.
pub fn default_users() -> Vec<User> {
    vec![
        User {
            id: UserId::new(1),
            mobile: "1234567890".into(),
            pin: "1234".into(),
            role: Role::Cashier,
            name: "John Cashier".into(),
        },
        User {
            id: UserId::new(2),
            mobile: "9876543210".into(),
            pin: "5678".into(),
            role: Role::Kitchen,
            name: "Sarah Kitchen".into(),
        },
        User {
            id: UserId::new(3),
            mobile: "5555555555".into(),
            pin: "9999".into(),
            role: Role::Admin,
            name: "Admin User".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_authenticate_matches_both_fields() {
        let directory = UserDirectory::new(Store::in_memory());

        let kitchen = directory.authenticate("9876543210", "5678").await.unwrap();
        assert_eq!(kitchen.role, Role::Kitchen);

        assert!(directory.authenticate("9876543210", "1234").await.is_none());
    }

    #[tokio::test]
    async fn test_profile_hides_pin() {
        let directory = UserDirectory::new(Store::in_memory());
        let admin = directory.find(UserId::new(3)).await.unwrap();
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("pin").is_none());
        assert_eq!(json["role"], "admin");
    }
}

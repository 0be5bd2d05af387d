//! User entity - an admin console account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Unrecognized stored values fall back to the least privileged role
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub company: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: RecordId, name: &str, email: &str, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.trim().to_string(),
            email: Self::normalize_email(email),
            role,
            company: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(UserRole::from_str_lossy("ADMIN"), UserRole::Admin);
        assert_eq!(UserRole::from_str_lossy("user"), UserRole::User);
        assert_eq!(UserRole::from_str_lossy("superuser"), UserRole::User);
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_new_user_normalizes_email() {
        let user = User::new(RecordId::new(1), " Asha ", " Asha@Example.com ", UserRole::Admin);
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.name, "Asha");
        assert!(user.is_admin());
    }
}

//! Identities held by the portal session: a student who proved who they are
//! with their national id, or an administrator authenticated by JWT.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

use crate::EntityId;

pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_SUPERADMIN: &str = "ROLE_SUPERADMIN";

/// Body of `POST /voeux/auth`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAuthRequest {
    pub id_national: String,
    pub nom: String,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

/// Student returned by a successful identity check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub id: EntityId,
    pub id_national: String,
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub lycee: String,
    pub demi_journee: String,
    #[serde(rename = "voeuxDejasoumis", default)]
    pub voeux_deja_soumis: bool,
}

/// Administrator session, as returned by `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub token: String,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AdminIdentity {
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Super-admins inherit every admin capability.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN) || self.has_role(ROLE_SUPERADMIN)
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPERADMIN)
    }
}

/// Whoever is currently logged into the portal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Student(StudentIdentity),
    Admin(AdminIdentity),
}

impl Identity {
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Student(s) => format!("{} {}", s.prenom, s.nom),
            Self::Admin(a) => format!("{} {}", a.prenom, a.nom),
        }
    }

    /// JWT to send as `Authorization: Bearer`. Students have none.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Self::Student(_) => None,
            Self::Admin(a) => Some(&a.token),
        }
    }

    #[must_use]
    pub fn as_student(&self) -> Option<&StudentIdentity> {
        match self {
            Self::Student(s) => Some(s),
            Self::Admin(_) => None,
        }
    }

    #[must_use]
    pub fn as_admin(&self) -> Option<&AdminIdentity> {
        match self {
            Self::Admin(a) => Some(a),
            Self::Student(_) => None,
        }
    }
}

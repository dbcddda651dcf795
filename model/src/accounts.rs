//! Administrator accounts managed by super-admins.
//!
//! Creation is checked locally before anything is sent: the backend only
//! rejects duplicates, the form rules live here.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod accounts_test;

use serde::{Deserialize, Serialize};

use crate::EntityId;

pub const MIN_PASSWORD_LEN: usize = 6;

/// `GET /superadmin/admins` row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: EntityId,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AdminAccount {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("le champ {0} est obligatoire")]
    Missing(&'static str),
    #[error("adresse email invalide: {0}")]
    InvalidEmail(String),
    #[error("le mot de passe doit contenir au moins {MIN_PASSWORD_LEN} caractères")]
    PasswordTooShort,
}

fn check_email(email: &str) -> Result<(), AccountError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if valid { Ok(()) } else { Err(AccountError::InvalidEmail(email.to_owned())) }
}

fn check_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::PasswordTooShort);
    }
    Ok(())
}

/// Body of `POST /superadmin/admins`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub nom: String,
    pub prenom: String,
    pub is_super_admin: bool,
}

impl NewAdmin {
    /// # Errors
    ///
    /// The first rule the form breaks.
    pub fn validate(&self) -> Result<(), AccountError> {
        for (field, value) in [("email", &self.email), ("nom", &self.nom), ("prenom", &self.prenom)] {
            if value.trim().is_empty() {
                return Err(AccountError::Missing(field));
            }
        }
        check_email(self.email.trim())?;
        check_password(&self.password)
    }
}

/// Body of `PUT /superadmin/admins/{id}`: only the fields that change.
/// The password is sent only when a new one is given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prenom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_super_admin: Option<bool>,
}

impl AdminUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// # Errors
    ///
    /// Same rules as creation, applied to the fields present.
    pub fn validate(&self) -> Result<(), AccountError> {
        if let Some(email) = &self.email {
            check_email(email.trim())?;
        }
        if let Some(password) = &self.password {
            check_password(password)?;
        }
        for (field, value) in [("nom", &self.nom), ("prenom", &self.prenom)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AccountError::Missing(field));
            }
        }
        Ok(())
    }
}

//! Route guards for the student and admin areas.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every front end (CLI today) asks the guard before showing a screen and
//! follows the redirect it returns, so the rules live in one place.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use fesup_model::{AdminIdentity, StudentIdentity};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision<R> {
    Allow,
    Redirect(R),
}

impl<R> GuardDecision<R> {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

// =============================================================================
// STUDENT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentRoute {
    Identification,
    IdentityConfirmation,
    Form,
    Summary,
    Confirmation,
}

impl StudentRoute {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Identification => "/voeux/identification",
            Self::IdentityConfirmation => "/voeux/confirmation-identite",
            Self::Form => "/voeux/formulaire",
            Self::Summary => "/voeux/recapitulatif",
            Self::Confirmation => "/voeux/confirmation",
        }
    }

    /// Identification and the final confirmation page are reachable by anyone.
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, Self::Identification | Self::Confirmation)
    }
}

/// Without a student every protected route goes back to identification; a
/// student who already submitted is sent to the confirmation page.
#[must_use]
pub fn student_guard(student: Option<&StudentIdentity>, route: StudentRoute) -> GuardDecision<StudentRoute> {
    if !route.is_protected() {
        return GuardDecision::Allow;
    }
    match student {
        None => GuardDecision::Redirect(StudentRoute::Identification),
        Some(s) if s.voeux_deja_soumis => GuardDecision::Redirect(StudentRoute::Confirmation),
        Some(_) => GuardDecision::Allow,
    }
}

// =============================================================================
// ADMIN
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminRoute {
    Login,
    Dashboard,
    Import,
    Eleves,
    Activites,
    Salles,
    Lycees,
    Creneaux,
    Sessions,
    Affectations,
    AdminManagement,
    SystemSettings,
}

impl AdminRoute {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/admin/dashboard",
            Self::Import => "/admin/import",
            Self::Eleves => "/admin/eleves",
            Self::Activites => "/admin/activites",
            Self::Salles => "/admin/salles",
            Self::Lycees => "/admin/lycees",
            Self::Creneaux => "/admin/creneaux",
            Self::Sessions => "/admin/sessions",
            Self::Affectations => "/admin/affectations",
            Self::AdminManagement => "/admin/admin-management",
            Self::SystemSettings => "/admin/system-settings",
        }
    }

    #[must_use]
    pub fn requires_super_admin(self) -> bool {
        matches!(self, Self::AdminManagement | Self::SystemSettings)
    }
}

#[must_use]
pub fn admin_guard(admin: Option<&AdminIdentity>, route: AdminRoute) -> GuardDecision<AdminRoute> {
    if route == AdminRoute::Login {
        return GuardDecision::Allow;
    }
    let Some(admin) = admin.filter(|a| a.is_admin()) else {
        return GuardDecision::Redirect(AdminRoute::Login);
    };
    if route.requires_super_admin() && !admin.is_super_admin() {
        return GuardDecision::Redirect(AdminRoute::Dashboard);
    }
    GuardDecision::Allow
}

//! Assignment job wire types and result statistics.
//!
//! SYSTEM CONTEXT
//! ==============
//! The solver runs on the backend. The client only launches it, polls
//! `/admin/affectations/resultats` until the status reads `COMPLETED`, then
//! renders the returned assignments alongside the hard/soft score.

#[cfg(test)]
#[path = "affectation_test.rs"]
mod affectation_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::reference::SessionDto;

/// `GET /admin/affectations/status`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectationStatus {
    pub running: bool,
    #[serde(default)]
    pub has_existing_results: bool,
}

/// `POST /admin/affectations/lancer` acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    pub problem_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub status: String,
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Running,
    Completed,
    Error,
}

/// `GET /admin/affectations/resultats`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectationResultat {
    pub status: ResultStatus,
    pub score: Option<String>,
    pub hard_score: Option<i64>,
    pub soft_score: Option<i64>,
    pub affectations: Option<Vec<AffectationDto>>,
    pub message: Option<String>,
    pub problem_id: Option<uuid::Uuid>,
}

impl AffectationResultat {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ResultStatus::Completed
    }

    /// Score of a completed run; absent components read as zero.
    #[must_use]
    pub fn score(&self) -> Score {
        Score {
            label: self.score.clone().unwrap_or_default(),
            hard: self.hard_score.unwrap_or(0),
            soft: self.soft_score.unwrap_or(0),
        }
    }
}

/// Solver score. Hard violations must be zero for a feasible assignment;
/// soft is the preference cost (closer to zero is better).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub label: String,
    pub hard: i64,
    pub soft: i64,
}

impl Score {
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.hard == 0
    }
}

// =============================================================================
// ASSIGNMENTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectationEleve {
    pub id: EntityId,
    pub nom: String,
    pub prenom: String,
    pub lycee: Option<NamedRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub nom: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedActivite {
    pub id: EntityId,
    pub titre: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedCreneau {
    pub libelle: String,
    pub demi_journee: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedSession {
    pub id: EntityId,
    pub activite: AssignedActivite,
    pub salle: NamedRef,
    pub creneau: AssignedCreneau,
}

/// One student-to-session assignment. `assigned_session` is empty when the
/// solver could not place the student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectationDto {
    pub id: Option<EntityId>,
    pub eleve: AffectationEleve,
    pub assigned_session: Option<AssignedSession>,
}

/// Per-student coverage of an assignment result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentStats {
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
    /// Rounded percentage of students with at least one session.
    pub satisfaction_rate: u32,
}

impl AssignmentStats {
    /// Count students (not rows): a student appears once per wish slot.
    #[must_use]
    pub fn compute(affectations: &[AffectationDto]) -> Self {
        let students: BTreeSet<EntityId> = affectations.iter().map(|a| a.eleve.id).collect();
        let assigned: BTreeSet<EntityId> = affectations
            .iter()
            .filter(|a| a.assigned_session.is_some())
            .map(|a| a.eleve.id)
            .collect();

        let total = students.len();
        let assigned = assigned.len();
        let satisfaction_rate = if total == 0 {
            0
        } else {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            let rate = ((assigned as f64 / total as f64) * 100.0).round() as u32;
            rate
        };

        Self { total, assigned, unassigned: total - assigned, satisfaction_rate }
    }
}

/// Sessions an assignment may be moved to: those in the same demi-journée as
/// its current session, or every session when it has none.
#[must_use]
pub fn sessions_for<'a>(affectation: &AffectationDto, sessions: &'a [SessionDto]) -> Vec<&'a SessionDto> {
    let Some(current) = &affectation.assigned_session else {
        return sessions.iter().collect();
    };
    let demi_journee = current.creneau.demi_journee.as_str();
    sessions
        .iter()
        .filter(|s| s.creneau_demi_journee.as_deref() == Some(demi_journee))
        .collect()
}

/// The session `session_id` if it is a legal move for `affectation`.
#[must_use]
pub fn reassignment_target<'a>(
    affectation: &AffectationDto,
    sessions: &'a [SessionDto],
    session_id: EntityId,
) -> Option<&'a SessionDto> {
    sessions_for(affectation, sessions).into_iter().find(|s| s.id == Some(session_id))
}

//! Ranked wish sets and their cross-field validation.
//!
//! DESIGN
//! ======
//! A wish set has five ranked slots split in two groups: slots 1-2 pick
//! conferences, slots 3-5 pick round tables or job flashes. Validation is a
//! pure function over the five values that reports every violated rule at
//! once, so a form can show all applicable messages side by side. Unset
//! slots never trigger a rule; completeness is checked separately when a
//! submission is built.

#[cfg(test)]
#[path = "wishes_test.rs"]
mod wishes_test;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EntityId;

pub const SLOT_COUNT: usize = 5;

/// Conference slots are indices `0..CONFERENCE_SLOTS`, activity slots the rest.
pub const CONFERENCE_SLOTS: usize = 2;

// =============================================================================
// RULES
// =============================================================================

/// One independent cross-field rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WishRule {
    /// Slot 1 equals slot 2.
    #[serde(rename = "doublonVoeux12")]
    DuplicateConferences,
    /// Two of slots 3-5 hold the same activity.
    #[serde(rename = "doublonVoeux345")]
    DuplicateActivities,
    /// One of slots 3-5 repeats slot 1 or 2.
    #[serde(rename = "doublonEntre12Et345")]
    CrossDuplicate,
}

impl WishRule {
    pub const ALL: [Self; 3] = [Self::DuplicateConferences, Self::DuplicateActivities, Self::CrossDuplicate];

    /// Stable machine tag, identical to the backend validation keys.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::DuplicateConferences => "doublonVoeux12",
            Self::DuplicateActivities => "doublonVoeux345",
            Self::CrossDuplicate => "doublonEntre12Et345",
        }
    }

    /// User-facing explanation.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::DuplicateConferences => "Les vœux 1 et 2 doivent être différents",
            Self::DuplicateActivities => "Les vœux 3, 4 et 5 doivent tous être différents",
            Self::CrossDuplicate => "Vous ne pouvez pas choisir une activité déjà sélectionnée en vœu 1 ou 2",
        }
    }
}

impl fmt::Display for WishRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Set of rules violated by a wish set. Empty means valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violations(BTreeSet<WishRule>);

impl Violations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, rule: WishRule) -> bool {
        self.0.contains(&rule)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = WishRule> + '_ {
        self.0.iter().copied()
    }

    /// Messages in rule order, one per violated rule.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.iter().map(WishRule::message).collect()
    }

    fn insert(&mut self, rule: WishRule) {
        self.0.insert(rule);
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

// =============================================================================
// SLOTS
// =============================================================================

/// The five ranked selections, possibly partially filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishSlots(pub [Option<EntityId>; SLOT_COUNT]);

impl WishSlots {
    #[must_use]
    pub fn filled(values: [EntityId; SLOT_COUNT]) -> Self {
        Self(values.map(Some))
    }

    #[must_use]
    pub fn conferences(&self) -> &[Option<EntityId>] {
        &self.0[..CONFERENCE_SLOTS]
    }

    #[must_use]
    pub fn activities(&self) -> &[Option<EntityId>] {
        &self.0[CONFERENCE_SLOTS..]
    }

    /// Rebuild the slots from stored wishes; `ordre` 1-5 picks the slot,
    /// other values are ignored.
    #[must_use]
    pub fn from_recorded(wishes: &[RecordedWish]) -> Self {
        let mut slots = Self::default();
        for wish in wishes {
            if let Some(slot) = usize::from(wish.ordre).checked_sub(1).and_then(|i| slots.0.get_mut(i)) {
                *slot = Some(wish.activite_id);
            }
        }
        slots
    }

    /// 1-based index of the first empty slot.
    #[must_use]
    pub fn first_missing(&self) -> Option<usize> {
        self.0.iter().position(Option::is_none).map(|i| i + 1)
    }
}

/// Evaluate every rule against the slots.
#[must_use]
pub fn validate(slots: &WishSlots) -> Violations {
    let mut violations = Violations::default();

    if let [Some(first), Some(second)] = slots.conferences() {
        if first == second {
            violations.insert(WishRule::DuplicateConferences);
        }
    }

    let activities: Vec<EntityId> = slots.activities().iter().flatten().copied().collect();
    let unique: BTreeSet<EntityId> = activities.iter().copied().collect();
    if unique.len() != activities.len() {
        violations.insert(WishRule::DuplicateActivities);
    }

    let conferences: BTreeSet<EntityId> = slots.conferences().iter().flatten().copied().collect();
    if activities.iter().any(|a| conferences.contains(a)) {
        violations.insert(WishRule::CrossDuplicate);
    }

    violations
}

// =============================================================================
// SUBMISSION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WishError {
    #[error("le vœu {slot} n'est pas renseigné")]
    Incomplete { slot: usize },
    #[error("vœux invalides: {0}")]
    Invalid(Violations),
}

/// Body of `POST /voeux/soumettre`. Only constructible from a complete,
/// valid wish set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishSubmission {
    pub eleve_id: EntityId,
    pub conference_voeu1: EntityId,
    pub conference_voeu2: EntityId,
    pub activite_voeu3: EntityId,
    pub activite_voeu4: EntityId,
    pub activite_voeu5: EntityId,
}

impl WishSubmission {
    /// Build a submission for `eleve_id`.
    ///
    /// # Errors
    ///
    /// `Incomplete` for the first unset slot, `Invalid` when any rule fails.
    pub fn from_slots(eleve_id: EntityId, slots: &WishSlots) -> Result<Self, WishError> {
        if let Some(slot) = slots.first_missing() {
            return Err(WishError::Incomplete { slot });
        }
        let violations = validate(slots);
        if !violations.is_empty() {
            return Err(WishError::Invalid(violations));
        }
        let [Some(c1), Some(c2), Some(a3), Some(a4), Some(a5)] = slots.0 else {
            return Err(WishError::Incomplete { slot: 1 });
        };
        Ok(Self {
            eleve_id,
            conference_voeu1: c1,
            conference_voeu2: c2,
            activite_voeu3: a3,
            activite_voeu4: a4,
            activite_voeu5: a5,
        })
    }
}

/// Backend acknowledgement of a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishSubmissionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub date_soumission: Option<String>,
}

/// A stored wish, as listed by `GET /eleves/{id}/voeux`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedWish {
    pub id: Option<EntityId>,
    pub eleve_id: EntityId,
    pub activite_id: EntityId,
    pub ordre: u8,
}

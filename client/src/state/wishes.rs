//! Wish form state.
//!
//! The form re-validates on every change and keeps all current violations so
//! the view can show each applicable message at once.

#[cfg(test)]
#[path = "wishes_test.rs"]
mod wishes_test;

use fesup_model::wishes::{SLOT_COUNT, validate};
use fesup_model::{EntityId, Violations, WishError, WishSlots, WishSubmission};

#[derive(Clone, Debug, Default)]
pub struct WishForm {
    slots: WishSlots,
    violations: Violations,
    /// Last server-side failure, shown under the form.
    pub server_error: Option<String>,
}

impl WishForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn slots(&self) -> &WishSlots {
        &self.slots
    }

    /// Set slot `index` (0-based) and re-run validation. Out-of-range
    /// indices are ignored.
    pub fn set_slot(&mut self, index: usize, value: Option<EntityId>) {
        if index >= SLOT_COUNT {
            return;
        }
        self.slots.0[index] = value;
        self.server_error = None;
        self.violations = validate(&self.slots);
    }

    #[must_use]
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Messages to display, one per violated rule, then the server error.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self.violations.messages().into_iter().map(str::to_owned).collect();
        if let Some(e) = &self.server_error {
            errors.push(e.clone());
        }
        errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty() && self.slots.first_missing().is_none()
    }

    /// Build the request body, or the reason submission is blocked.
    ///
    /// # Errors
    ///
    /// See [`WishSubmission::from_slots`].
    pub fn submission(&self, eleve_id: EntityId) -> Result<WishSubmission, WishError> {
        WishSubmission::from_slots(eleve_id, &self.slots)
    }
}

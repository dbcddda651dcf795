//! Assignment-run state for the results view.
//!
//! DESIGN
//! ======
//! Three phases: `Idle` -> `Running` on an explicit start, `Running` stays
//! `Running` while polls report anything but `COMPLETED`, and the first
//! `COMPLETED` poll moves to `Completed` with the score and assignments.
//! Transitions are plain methods so they can be driven by the poller task,
//! a reload, or a test without any timer involved.
//!
//! ERROR HANDLING
//! ==============
//! A failed launch or poll drops back to `Idle` and records the message.
//! Nothing re-launches or re-polls automatically.

#[cfg(test)]
#[path = "affectation_test.rs"]
mod affectation_test;

use fesup_model::{AffectationDto, AffectationResultat, AffectationStatus, AssignmentStats, Score};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Completed,
}

/// What the poller should do after applying one poll response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    Finished,
}

/// What a freshly loaded view should do after reading the job status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadAction {
    /// A job is running server-side: resume polling it.
    ResumePolling,
    /// Results exist server-side but none are loaded: fetch them once.
    FetchExisting,
    Nothing,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AffectationRun {
    pub phase: RunPhase,
    /// Present only when the results came from a completed poll.
    pub score: Option<Score>,
    pub affectations: Vec<AffectationDto>,
    pub has_results: bool,
    pub error: Option<String>,
}

impl AffectationRun {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Enter `Running` for a new launch. Returns `false` (and changes
    /// nothing) when a run is already in progress.
    pub fn begin(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        *self = Self { phase: RunPhase::Running, ..Self::default() };
        true
    }

    pub fn launch_failed(&mut self, message: impl Into<String>) {
        self.phase = RunPhase::Idle;
        self.error = Some(message.into());
    }

    /// Apply one poll response. Only a `Running` run can complete, so a late
    /// response after completion or cancellation is ignored.
    pub fn apply_poll(&mut self, resultat: &AffectationResultat) -> PollOutcome {
        if !self.is_running() {
            return PollOutcome::Finished;
        }
        if !resultat.is_completed() {
            return PollOutcome::Continue;
        }
        self.phase = RunPhase::Completed;
        self.has_results = true;
        self.score = Some(resultat.score());
        self.affectations = resultat.affectations.clone().unwrap_or_default();
        self.error = None;
        PollOutcome::Finished
    }

    pub fn poll_failed(&mut self, message: impl Into<String>) {
        self.phase = RunPhase::Idle;
        self.error = Some(message.into());
    }

    /// Polling was stopped by the user or by view teardown.
    pub fn cancelled(&mut self) {
        if self.is_running() {
            self.phase = RunPhase::Idle;
        }
    }

    /// Decide what to do with the job status read on (re)load.
    pub fn reconcile(&mut self, status: &AffectationStatus) -> ReloadAction {
        if status.running {
            self.phase = RunPhase::Running;
            return ReloadAction::ResumePolling;
        }
        if status.has_existing_results && !self.has_results {
            return ReloadAction::FetchExisting;
        }
        ReloadAction::Nothing
    }

    /// Show previously computed assignments without re-running the solver.
    pub fn load_existing(&mut self, affectations: Vec<AffectationDto>) {
        if affectations.is_empty() {
            return;
        }
        self.affectations = affectations;
        self.has_results = true;
        if !self.is_running() {
            self.phase = RunPhase::Completed;
        }
    }

    /// Swap in a manually reassigned row.
    pub fn replace(&mut self, updated: AffectationDto) {
        if let Some(row) = self.affectations.iter_mut().find(|a| a.id.is_some() && a.id == updated.id) {
            *row = updated;
        }
    }

    #[must_use]
    pub fn stats(&self) -> AssignmentStats {
        AssignmentStats::compute(&self.affectations)
    }
}

//! Assignment-run poller and view controller.
//!
//! DESIGN
//! ======
//! `Poller` owns at most one background task, tagged with the `JobId` it is
//! following. Starting a task aborts the previous one, and dropping the
//! poller aborts whatever is still running, so leaving the view never
//! leaves a timer behind.
//!
//! `AffectationRunner` composes the API, the run state, and the poller.
//! Run state lives in a `watch` channel: the poll task writes through
//! `send_modify`, views read snapshots or subscribe.
//!
//! TIMING
//! ======
//! The first results request goes out one interval after start, then once
//! per interval. Missed ticks are skipped rather than bursted.
//!
//! ERROR HANDLING
//! ==============
//! A failed poll ends the task and records the message on the run. There is
//! no retry; the user relaunches or reloads.

#[cfg(test)]
#[path = "poller_test.rs"]
mod poller_test;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use fesup_model::LaunchResponse;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ClientError;
use crate::net::api::AffectationApi;
use crate::state::affectation::{AffectationRun, PollOutcome, ReloadAction};

/// Identifies the job a polling task follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobId {
    /// Backend problem id returned by a launch.
    Problem(Uuid),
    /// A launch that came back without a problem id.
    Launched,
    /// A job found running on reload.
    Resumed,
}

impl From<Option<Uuid>> for JobId {
    fn from(problem_id: Option<Uuid>) -> Self {
        problem_id.map_or(Self::Launched, Self::Problem)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Problem(id) => write!(f, "{id}"),
            Self::Launched => f.write_str("launched"),
            Self::Resumed => f.write_str("resumed"),
        }
    }
}

// =============================================================================
// POLLER
// =============================================================================

#[derive(Debug, Default)]
pub struct Poller {
    active: Option<(JobId, JoinHandle<()>)>,
}

impl Poller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` for `job`, aborting any task already running.
    pub fn start<F>(&mut self, job: JobId, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(previous) = self.cancel() {
            debug!(%previous, %job, "replacing polling task");
        }
        self.active = Some((job, tokio::spawn(task)));
    }

    /// Abort the current task. Returns the job it was following, if the
    /// task had not already finished.
    pub fn cancel(&mut self) -> Option<JobId> {
        let (job, handle) = self.active.take()?;
        if handle.is_finished() {
            return None;
        }
        handle.abort();
        Some(job)
    }

    /// The job being followed while its task is still alive.
    #[must_use]
    pub fn active_job(&self) -> Option<JobId> {
        self.active.as_ref().filter(|(_, handle)| !handle.is_finished()).map(|(job, _)| *job)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_job().is_some()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.active.take() {
            handle.abort();
        }
    }
}

async fn poll_until_settled(
    api: Arc<dyn AffectationApi>,
    state: Arc<watch::Sender<AffectationRun>>,
    period: Duration,
    job: JobId,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut polls: u32 = 0;

    loop {
        ticker.tick().await;
        polls += 1;
        match api.results().await {
            Ok(resultat) => {
                let mut outcome = PollOutcome::Finished;
                state.send_modify(|run| outcome = run.apply_poll(&resultat));
                if outcome == PollOutcome::Finished {
                    info!(%job, polls, "assignment run settled");
                    return;
                }
                debug!(%job, polls, status = ?resultat.status, "assignment still running");
            }
            Err(e) => {
                warn!(%job, polls, error = %e, "assignment poll failed");
                state.send_modify(|run| run.poll_failed(e.to_string()));
                return;
            }
        }
    }
}

// =============================================================================
// RUNNER
// =============================================================================

pub struct AffectationRunner {
    api: Arc<dyn AffectationApi>,
    state: Arc<watch::Sender<AffectationRun>>,
    poller: Poller,
    interval: Duration,
}

impl AffectationRunner {
    #[must_use]
    pub fn new(api: Arc<dyn AffectationApi>, interval: Duration) -> Self {
        let (tx, _rx) = watch::channel(AffectationRun::default());
        Self { api, state: Arc::new(tx), poller: Poller::new(), interval }
    }

    /// Launch a new run and start polling it.
    ///
    /// # Errors
    ///
    /// `AlreadyRunning` when a run is in progress locally, or the launch
    /// error (also recorded on the run state).
    pub async fn start(&mut self) -> Result<LaunchResponse, ClientError> {
        if !self.state.send_if_modified(AffectationRun::begin) {
            return Err(ClientError::AlreadyRunning);
        }
        match self.api.launch().await {
            Ok(response) => {
                self.follow(JobId::from(response.problem_id));
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "assignment launch failed");
                self.state.send_modify(|run| run.launch_failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Reconcile with the backend after a (re)load: resume polling a
    /// running job, or fetch existing results once.
    ///
    /// # Errors
    ///
    /// Returns the status or list failure after recording it on the run.
    pub async fn reload(&mut self) -> Result<ReloadAction, ClientError> {
        let status = self.api.status().await.inspect_err(|e| self.record_error(e))?;
        let mut action = ReloadAction::Nothing;
        self.state.send_modify(|run| action = run.reconcile(&status));

        match action {
            ReloadAction::ResumePolling => {
                if !self.poller.is_active() {
                    self.follow(JobId::Resumed);
                }
            }
            ReloadAction::FetchExisting => {
                let affectations = self.api.list_affectations().await.inspect_err(|e| self.record_error(e))?;
                info!(count = affectations.len(), "loaded existing assignments");
                self.state.send_modify(|run| run.load_existing(affectations));
            }
            ReloadAction::Nothing => {}
        }
        Ok(action)
    }

    #[must_use]
    pub fn snapshot(&self) -> AffectationRun {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AffectationRun> {
        self.state.subscribe()
    }

    /// The job currently polled, if any.
    #[must_use]
    pub fn polling(&self) -> Option<JobId> {
        self.poller.active_job()
    }

    /// Resolve once the run is no longer `Running`.
    pub async fn wait_settled(&self) -> AffectationRun {
        let mut rx = self.state.subscribe();
        rx.wait_for(|run| !run.is_running())
            .await
            .map_or_else(|_| self.snapshot(), |run| run.clone())
    }

    /// Apply a local edit to the loaded run (e.g. a manual reassignment).
    pub fn update(&self, edit: impl FnOnce(&mut AffectationRun)) {
        self.state.send_modify(edit);
    }

    /// Stop polling. A run still in progress server-side is left alone and
    /// can be resumed with `reload`.
    pub fn shutdown(&mut self) {
        if let Some(job) = self.poller.cancel() {
            info!(%job, "assignment polling cancelled");
        }
        self.state.send_modify(AffectationRun::cancelled);
    }

    fn follow(&mut self, job: JobId) {
        info!(%job, interval_secs = self.interval.as_secs(), "polling assignment results");
        let task = poll_until_settled(Arc::clone(&self.api), Arc::clone(&self.state), self.interval, job);
        self.poller.start(job, task);
    }

    fn record_error(&self, error: &ClientError) {
        warn!(error = %error, "assignment status check failed");
        self.state.send_modify(|run| run.error = Some(error.to_string()));
    }
}

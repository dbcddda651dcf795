//! FESUP portal client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the FESUP backend over REST. Students identify themselves and
//! submit five ranked wishes; administrators manage reference data, launch
//! the assignment solver, and follow it until results are available. The
//! solver itself runs server-side.
//!
//! Layout: `net` holds the HTTP calls, `state` holds pure view state,
//! `poller` drives the long-running assignment job, `guard` and `confirm`
//! hold navigation and destructive-action rules.

pub mod config;
pub mod confirm;
pub mod error;
pub mod guard;
pub mod net;
pub mod poller;
pub mod state;

pub use config::ClientConfig;
pub use error::ClientError;
pub use net::{AffectationApi, ApiClient};
pub use poller::{AffectationRunner, JobId, Poller};
pub use state::affectation::{AffectationRun, RunPhase};
pub use state::session::SessionStore;
pub use state::wishes::WishForm;

//! Shared domain model for the FESUP wishes and assignment portal.
//!
//! This crate owns the JSON wire representation exchanged with the backend
//! together with the pure rules the client enforces before talking to it
//! (wish validation, demi-journée labels, assignment statistics). It has no
//! I/O so both the client library and the CLI can depend on it directly.

pub mod accounts;
pub mod affectation;
pub mod cleanup;
pub mod demi_journee;
pub mod identity;
pub mod import;
pub mod reference;
pub mod wishes;

pub use affectation::{
    AffectationDto, AffectationResultat, AffectationStatus, AssignmentStats, LaunchResponse, ResultStatus, Score,
};
pub use accounts::{AccountError, AdminAccount, AdminUpdate, NewAdmin};
pub use cleanup::{DeleteReport, Dependent, ExportTarget, ReferenceEntity};
pub use demi_journee::DemiJournee;
pub use identity::{AdminIdentity, AdminLoginRequest, Identity, StudentAuthRequest, StudentIdentity};
pub use import::{ImportReport, ImportTarget};
pub use wishes::{RecordedWish, Violations, WishError, WishRule, WishSlots, WishSubmission, WishSubmissionResponse};

/// Backend identifier for persisted entities (`Long` on the server side).
pub type EntityId = i64;

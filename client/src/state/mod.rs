//! Client-side state holders.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the single identity holder shared by every view, `wishes`
//! backs the student form, and `affectation` tracks an assignment run.

pub mod affectation;
pub mod session;
pub mod wishes;

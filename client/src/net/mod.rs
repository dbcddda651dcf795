//! Networking: REST calls to the FESUP backend.

pub mod api;

pub use api::{AffectationApi, ApiClient};

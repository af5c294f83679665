//! Login gate: format checks, credential comparison and attempt lockout.
//!
//! This module provides:
//! - `LoginGate`: Checks attempts against the configured credential and locks
//!   after too many mismatches
//! - `Session`: In-memory attempt count and lock flag for one run
//! - `Credential`: The fixed username/password pair
//!
//! Nothing here performs I/O. Callers collect input and present outcomes.

pub mod credentials;
pub mod gate;
pub mod session;
pub mod validation;

pub use credentials::Credential;
pub use gate::{LoginGate, LoginOutcome};
pub use session::{GateState, Session};
pub use validation::{validate_format, validate_password, validate_username};

//! Core library for logingate.
//!
//! A small login gate: a username/password pair is checked for format, then
//! compared against one configured credential. Mismatches count down a fixed
//! number of attempts and the gate locks when they run out. Only an explicit
//! reset unlocks it.
//!
//! ```
//! use logingate_core::{GateConfig, LoginGate, LoginOutcome};
//!
//! let mut gate = LoginGate::new(GateConfig::default()).unwrap();
//! assert_eq!(
//!     gate.attempt("admin", "0000"),
//!     Ok(LoginOutcome::Rejected { attempts_remaining: 4 })
//! );
//! assert_eq!(gate.attempt("admin", "1234"), Ok(LoginOutcome::Success));
//! ```

pub mod auth;
pub mod config;
pub mod error;

pub use auth::{Credential, GateState, LoginGate, LoginOutcome, Session};
pub use config::GateConfig;
pub use error::{ConfigError, FormatError};

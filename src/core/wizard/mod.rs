//! Wizard State Machine for the Voting Flow
//!
//! Drives the seven-screen voting wizard.
//!
//! # Overview
//!
//! 1. Introduction - Welcome screen
//! 2. Registration - Name, age, mobile number, identity document
//! 3. OTP Verification - Six-digit one time password
//! 4. Verify Details - Read-only review of voter and candidates
//! 5. Voting - Single party selection
//! 6. Face Verification - Four simulated camera captures
//! 7. Fingerprint - Simulated scan, then vote finalization
//!
//! # Design Principles
//!
//! - **Linear**: one integer, clamped increment, no back transition
//! - **Self-gating steps**: each step only asks to advance once its own
//!   predicate holds; the controller validates nothing itself
//! - **Isolated steps**: form state is owned by the active step and dropped
//!   with it

mod controller;
mod types;

pub use controller::*;
pub use types::*;

//! Per-step form state and gate predicates.
//!
//! Each type here is owned by exactly one active step and dropped when the
//! wizard moves on. None of them know about the controller: a step view asks
//! for an advance only after its form's `is_valid()` holds.

mod error;
pub mod face;
pub mod fingerprint;
pub mod otp;
pub mod registration;
pub mod review;
pub mod voting;

pub use error::ValidationError;
pub use face::{CaptureAngle, FaceCapture};
pub use fingerprint::{FingerprintScan, ScanState, VoteSummary};
pub use otp::{Countdown, OtpForm};
pub use registration::RegistrationForm;
pub use review::ReviewStep;
pub use voting::{Ballot, Party, PartyId};

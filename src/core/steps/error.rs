/// Reasons a step's gate is closed.
///
/// These never leave the step; they drive inline hints only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("You must be 18 or above to vote")]
    Underage,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Enter all {expected} digits of the OTP ({filled} entered)")]
    IncompleteOtp { filled: usize, expected: usize },

    #[error("Select a party before casting your vote")]
    NoSelection,

    #[error("Capture all face angles ({captured} of {expected} done)")]
    MissingCaptures { captured: usize, expected: usize },

    #[error("Fingerprint has not been verified yet")]
    ScanNotVerified,
}

//! Wizard Domain Types
//!
//! Defines the static half of the voting wizard:
//! - [`WizardStep`]: the seven screens, in order
//! - [`StepDefinition`]: label, title, illustration and side panel per step
//! - [`STEP_TABLE`]: the immutable step table, indexed by step position
//! - [`StepStatus`]: how the progress indicator shows a step
//!
//! # Usage
//!
//! ```rust
//! use evote::core::wizard::{WizardStep, STEP_TABLE};
//!
//! let def = &STEP_TABLE[WizardStep::Voting.index()];
//! assert_eq!(def.label, "Vote");
//! assert_eq!(WizardStep::Voting.next(), Some(WizardStep::FaceVerification));
//! ```

use std::fmt;

/// Number of steps in the wizard.
pub const STEP_COUNT: usize = 7;

/// Index of the terminal step.
pub const LAST_STEP_INDEX: usize = STEP_COUNT - 1;

// ============================================================================
// WizardStep
// ============================================================================

/// One screen of the linear voting wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Introduction,
    Registration,
    OtpVerification,
    VerifyDetails,
    Voting,
    FaceVerification,
    FingerprintVote,
}

impl WizardStep {
    pub const ALL: [WizardStep; STEP_COUNT] = [
        WizardStep::Introduction,
        WizardStep::Registration,
        WizardStep::OtpVerification,
        WizardStep::VerifyDetails,
        WizardStep::Voting,
        WizardStep::FaceVerification,
        WizardStep::FingerprintVote,
    ];

    /// Position of this step in the wizard (0-based).
    pub fn index(self) -> usize {
        match self {
            WizardStep::Introduction => 0,
            WizardStep::Registration => 1,
            WizardStep::OtpVerification => 2,
            WizardStep::VerifyDetails => 3,
            WizardStep::Voting => 4,
            WizardStep::FaceVerification => 5,
            WizardStep::FingerprintVote => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<WizardStep> {
        Self::ALL.get(index).copied()
    }

    /// The following step, or `None` on the terminal step.
    pub fn next(self) -> Option<WizardStep> {
        Self::from_index(self.index() + 1)
    }

    pub fn is_terminal(self) -> bool {
        self.index() == LAST_STEP_INDEX
    }

    /// Short label shown in the progress indicator.
    pub fn label(self) -> &'static str {
        STEP_TABLE[self.index()].label
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::Introduction => "introduction",
            WizardStep::Registration => "registration",
            WizardStep::OtpVerification => "otp_verification",
            WizardStep::VerifyDetails => "verify_details",
            WizardStep::Voting => "voting",
            WizardStep::FaceVerification => "face_verification",
            WizardStep::FingerprintVote => "fingerprint_vote",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a step relates to the current position, for the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Current,
    Pending,
}

impl StepStatus {
    pub fn of(step: WizardStep, current: WizardStep) -> Self {
        match step.index().cmp(&current.index()) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }
}

// ============================================================================
// StepDefinition
// ============================================================================

/// A heading + body pair in a step's side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoCard {
    pub title: &'static str,
    pub body: &'static str,
}

/// Side panel shown next to the active step's form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aside {
    pub heading: &'static str,
    /// Whether the cards are an ordered procedure (numbered) or loose notes.
    pub numbered: bool,
    pub cards: &'static [InfoCard],
}

/// Static description of a step: what the progress bar calls it and what
/// surrounds its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub step: WizardStep,
    pub label: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub illustration: &'static [&'static str],
    pub aside: Aside,
}

const ILLUSTRATION_PEOPLE: &[&str] = &[
    r"   ___       ___   ",
    r"  /   \     /   \  ",
    r"  \___/     \___/  ",
    r"  /   \ ___ /   \  ",
    r" |     /   \     | ",
    r" |     \___/     | ",
    r"      /     \      ",
    r"     |       |     ",
];

const ILLUSTRATION_REGISTER: &[&str] = &[
    r"  .-----------.  ",
    r"  |  ( o )    |  ",
    r"  |  /   \    |  ",
    r"  |  -----    |  ",
    r"  |  =======  |  ",
    r"  |  =====    |  ",
    r"  '-----------'  ",
];

const ILLUSTRATION_MESSAGE: &[&str] = &[
    r"  .-------------.  ",
    r"  |  * * * * *  |  ",
    r"  |  * 1 2 3 *  |  ",
    r"  |  * * * * *  |  ",
    r"  '----.  .-----'  ",
    r"        \/         ",
];

const ILLUSTRATION_USER_CHECK: &[&str] = &[
    r"    ___            ",
    r"   /   \           ",
    r"   \___/      /    ",
    r"   /   \  \  /     ",
    r"  |     |  \/      ",
    r"  '-----'          ",
];

const ILLUSTRATION_BALLOT: &[&str] = &[
    r"     _______       ",
    r"    |  [x]  |      ",
    r"  __|_______|__    ",
    r" |  =========  |   ",
    r" |             |   ",
    r" |_____________|   ",
];

const ILLUSTRATION_CAMERA: &[&str] = &[
    r"     _______       ",
    r"  __|  ___  |__    ",
    r" |    /   \    |   ",
    r" |   | ( ) |   |   ",
    r" |    \___/    |   ",
    r" |_____________|   ",
];

const ILLUSTRATION_FINGERPRINT: &[&str] = &[
    r"    .-''''-.       ",
    r"   / .-''-. \      ",
    r"  | / .--. \ |     ",
    r"  | | |  | | |     ",
    r"  | | |  | | |     ",
    r"   \ '    ' /      ",
    r"    '-....-'       ",
];

/// The step table. Position `i` describes `WizardStep::ALL[i]`.
pub static STEP_TABLE: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        step: WizardStep::Introduction,
        label: "Start",
        title: "Your Vote, Your Voice!",
        subtitle: "Participate in a seamless and secure online voting experience.",
        illustration: ILLUSTRATION_PEOPLE,
        aside: Aside {
            heading: "Why vote online",
            numbered: false,
            cards: &[
                InfoCard {
                    title: "Secure and transparent process",
                    body: "Our e-voting system uses end-to-end encryption to ensure the security and integrity of your vote.",
                },
                InfoCard {
                    title: "Government-approved eVoting method",
                    body: "This platform is officially approved and meets all the regulatory requirements for electronic voting.",
                },
                InfoCard {
                    title: "Your data is encrypted and safe",
                    body: "We prioritize your privacy and security. All your personal information and vote are fully encrypted.",
                },
            ],
        },
    },
    StepDefinition {
        step: WizardStep::Registration,
        label: "Register",
        title: "Voter Registration",
        subtitle: "Please provide your details to register for voting.",
        illustration: ILLUSTRATION_REGISTER,
        aside: Aside {
            heading: "Important Information",
            numbered: false,
            cards: &[
                InfoCard {
                    title: "Enter accurate personal details",
                    body: "Make sure your name matches exactly as it appears on your official ID.",
                },
                InfoCard {
                    title: "Age must be 18 or above to vote",
                    body: "As per voting regulations, you must be at least 18 years old on the election date.",
                },
                InfoCard {
                    title: "Aadhaar used only for identity verification",
                    body: "Your Aadhaar details are only used to verify your identity and will not be stored.",
                },
                InfoCard {
                    title: "Your information is strictly confidential",
                    body: "All personal data is encrypted and protected under the Data Protection Act.",
                },
            ],
        },
    },
    StepDefinition {
        step: WizardStep::OtpVerification,
        label: "Verify",
        title: "Secure Your Vote with OTP Verification",
        subtitle: "Enter the OTP sent to your registered mobile number.",
        illustration: ILLUSTRATION_MESSAGE,
        aside: Aside {
            heading: "Important Information",
            numbered: false,
            cards: &[
                InfoCard {
                    title: "OTP is valid for 5 minutes",
                    body: "Enter the verification code within 5 minutes of receiving it. After that, you'll need to request a new code.",
                },
                InfoCard {
                    title: "Do not share your OTP with anyone",
                    body: "For security reasons, never share your OTP with anyone, not even election officials.",
                },
                InfoCard {
                    title: "Check your SMS inbox",
                    body: "The OTP has been sent to your registered mobile number. Check your SMS inbox.",
                },
                InfoCard {
                    title: "You'll proceed only if OTP is verified",
                    body: "This verification step is mandatory to ensure the security of the voting process.",
                },
            ],
        },
    },
    StepDefinition {
        step: WizardStep::VerifyDetails,
        label: "Review",
        title: "Verify Your Details",
        subtitle: "Please review your information and check your eligibility status.",
        illustration: ILLUSTRATION_USER_CHECK,
        aside: Aside {
            heading: "Important Information",
            numbered: false,
            cards: &[
                InfoCard {
                    title: "Review your details carefully",
                    body: "Make sure your personal information is correct before proceeding.",
                },
                InfoCard {
                    title: "Make sure your eligibility is confirmed",
                    body: "You can only vote if your eligibility status shows as \"Eligible\".",
                },
                InfoCard {
                    title: "Once you generate the URL, do not share it",
                    body: "Your voting link is unique to you and should not be shared with anyone else.",
                },
                InfoCard {
                    title: "Proceed only if you're sure",
                    body: "After generating the voting link, the process cannot be reversed.",
                },
            ],
        },
    },
    StepDefinition {
        step: WizardStep::Voting,
        label: "Vote",
        title: "Cast Your Vote",
        subtitle: "Select the party you want to vote for. This is a secure and anonymous process.",
        illustration: ILLUSTRATION_BALLOT,
        aside: Aside {
            heading: "How Voting Works",
            numbered: true,
            cards: &[
                InfoCard {
                    title: "Select your preferred party",
                    body: "Move to the party of your choice and press Enter",
                },
                InfoCard {
                    title: "Verify your selection",
                    body: "Make sure the right party is selected before casting",
                },
                InfoCard {
                    title: "Cast your vote",
                    body: "Your vote will be recorded securely and anonymously",
                },
                InfoCard {
                    title: "Complete verification",
                    body: "Verify your identity with face and fingerprint authentication",
                },
            ],
        },
    },
    StepDefinition {
        step: WizardStep::FaceVerification,
        label: "Face ID",
        title: "Face Verification",
        subtitle: "Please capture facial images from different angles for verification.",
        illustration: ILLUSTRATION_CAMERA,
        aside: Aside {
            heading: "Face Verification Process",
            numbered: true,
            cards: &[
                InfoCard {
                    title: "Front View Capture",
                    body: "Look directly at the camera with a neutral expression",
                },
                InfoCard {
                    title: "Left Profile",
                    body: "Turn your head slightly to the left (about 45 degrees)",
                },
                InfoCard {
                    title: "Right Profile",
                    body: "Turn your head slightly to the right (about 45 degrees)",
                },
                InfoCard {
                    title: "Upward Angle",
                    body: "Tilt your chin upward slightly while facing the camera",
                },
            ],
        },
    },
    StepDefinition {
        step: WizardStep::FingerprintVote,
        label: "Fingerprint",
        title: "Fingerprint Verification & Vote Finalization",
        subtitle: "Complete the verification process with your fingerprint to cast your vote.",
        illustration: ILLUSTRATION_FINGERPRINT,
        aside: Aside {
            heading: "Final Verification Step",
            numbered: false,
            cards: &[
                InfoCard {
                    title: "Why Fingerprint Verification?",
                    body: "Fingerprint verification serves as the final security measure to ensure that only the registered voter can cast the vote.",
                },
                InfoCard {
                    title: "Fingerprint Security",
                    body: "Your fingerprint data is encrypted end-to-end and only used for verification, not stored permanently.",
                },
                InfoCard {
                    title: "After Casting Your Vote",
                    body: "Once your vote is cast, it is anonymized. No one can link your identity to your specific vote.",
                },
            ],
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_step() {
        for (i, def) in STEP_TABLE.iter().enumerate() {
            assert_eq!(def.step.index(), i, "table entry {i} describes {:?}", def.step);
            assert_eq!(WizardStep::from_index(i), Some(def.step));
        }
    }

    #[test]
    fn test_progress_labels() {
        let labels: Vec<&str> = WizardStep::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Start", "Register", "Verify", "Review", "Vote", "Face ID", "Fingerprint"]
        );
    }

    #[test]
    fn test_next_is_linear() {
        assert_eq!(WizardStep::Introduction.next(), Some(WizardStep::Registration));
        assert_eq!(WizardStep::FaceVerification.next(), Some(WizardStep::FingerprintVote));
        assert_eq!(WizardStep::FingerprintVote.next(), None);
        assert!(WizardStep::FingerprintVote.is_terminal());
        assert!(!WizardStep::Voting.is_terminal());
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(WizardStep::from_index(STEP_COUNT), None);
    }

    #[test]
    fn test_step_status() {
        let current = WizardStep::Voting;
        assert_eq!(StepStatus::of(WizardStep::Registration, current), StepStatus::Done);
        assert_eq!(StepStatus::of(WizardStep::Voting, current), StepStatus::Current);
        assert_eq!(StepStatus::of(WizardStep::FingerprintVote, current), StepStatus::Pending);
    }

    #[test]
    fn test_every_step_has_content() {
        for def in &STEP_TABLE {
            assert!(!def.title.is_empty());
            assert!(!def.illustration.is_empty());
            assert!(!def.aside.cards.is_empty());
        }
    }
}

//! Simulated fingerprint scan followed by vote finalization.
//!
//! The scan always succeeds: progress grows by a random step until it
//! reaches 100. Finalizing is a separate, explicit action.

use chrono::{DateTime, Local};
use rand::Rng;

use super::ValidationError;

/// Default upper bound of a single progress step.
pub const DEFAULT_MAX_INCREMENT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    /// Rendered but never entered by the simulation.
    Error,
    Success,
}

impl ScanState {
    pub fn message(self) -> &'static str {
        match self {
            ScanState::Idle => "Press Enter on the sensor to start scanning",
            ScanState::Scanning => "Scanning fingerprint...",
            ScanState::Success => "Fingerprint verified!",
            ScanState::Error => "Error. Please try again.",
        }
    }
}

/// Fixed summary shown beside the scanner. The party and voter id are not
/// read from earlier steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteSummary {
    pub party: &'static str,
    pub voter_id: &'static str,
    pub date: String,
    pub time: String,
}

impl VoteSummary {
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            party: "Progressive Party",
            voter_id: "VOTER-2025-78901",
            date: now.format("%d/%m/%Y").to_string(),
            time: now.format("%H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FingerprintScan {
    state: ScanState,
    progress: f64,
    finalized: bool,
    max_increment: f64,
    summary: VoteSummary,
}

impl FingerprintScan {
    /// A non-finite `max_increment` falls back to the default.
    pub fn new(max_increment: f64) -> Self {
        let max_increment = if max_increment.is_finite() {
            max_increment.max(f64::EPSILON)
        } else {
            log::warn!("Ignoring non-finite scan increment {max_increment}");
            DEFAULT_MAX_INCREMENT
        };
        Self {
            state: ScanState::Idle,
            progress: 0.0,
            finalized: false,
            max_increment,
            summary: VoteSummary::at(Local::now()),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Scan progress in percent, `0.0..=100.0`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn summary(&self) -> &VoteSummary {
        &self.summary
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Begin scanning. Only possible from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state != ScanState::Idle {
            return false;
        }
        self.state = ScanState::Scanning;
        self.progress = 0.0;
        log::info!("Fingerprint scan started");
        true
    }

    /// Add `increment` percent. Reaching 100 clamps and moves to `Success`.
    pub fn add_progress(&mut self, increment: f64) -> ScanState {
        if self.state != ScanState::Scanning {
            return self.state;
        }
        self.progress += increment.max(0.0);
        if self.progress >= 100.0 {
            self.progress = 100.0;
            self.state = ScanState::Success;
            log::info!("Fingerprint scan verified");
        }
        self.state
    }

    /// One timer period elapsed: grow by a random amount in
    /// `[0, max_increment)`.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> ScanState {
        let increment = rng.gen_range(0.0..self.max_increment);
        self.add_progress(increment)
    }

    /// Whether the timer driving this scan should keep running.
    pub fn needs_ticks(&self) -> bool {
        self.state == ScanState::Scanning
    }

    /// Confirm the vote. Allowed once, after a successful scan.
    pub fn finalize(&mut self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.finalized {
            return Err(ValidationError::InvalidValue {
                field: "vote",
                reason: "already finalized".to_string(),
            });
        }
        self.finalized = true;
        log::info!("Vote finalized");
        Ok(())
    }

    /// Gate for the finalize action.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.state {
            ScanState::Success => Ok(()),
            _ => Err(ValidationError::ScanNotVerified),
        }
    }
}

impl Default for FingerprintScan {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INCREMENT)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut scan = FingerprintScan::default();
        assert_eq!(scan.add_progress(50.0), ScanState::Idle);
        assert_eq!(scan.progress(), 0.0);
        assert!(!scan.needs_ticks());
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut scan = FingerprintScan::default();
        assert!(scan.start());
        assert!(!scan.start());
        assert!(scan.needs_ticks());
    }

    #[test]
    fn test_progress_clamps_to_success() {
        let mut scan = FingerprintScan::default();
        scan.start();
        assert_eq!(scan.add_progress(60.0), ScanState::Scanning);
        assert_eq!(scan.add_progress(60.0), ScanState::Success);
        assert_eq!(scan.progress(), 100.0);
        assert_eq!(scan.add_progress(10.0), ScanState::Success);
        assert!(!scan.needs_ticks());
    }

    #[test]
    fn test_random_ticks_eventually_succeed() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scan = FingerprintScan::default();
        scan.start();
        let mut ticks = 0;
        while scan.needs_ticks() {
            let before = scan.progress();
            scan.tick(&mut rng);
            assert!(scan.progress() - before < DEFAULT_MAX_INCREMENT);
            ticks += 1;
            assert!(ticks < 10_000, "scan never finished");
        }
        assert_eq!(scan.state(), ScanState::Success);
        assert!(ticks >= 7, "100% needs at least seven steps below 15");
    }

    #[test]
    fn test_finalize_requires_success_and_happens_once() {
        let mut scan = FingerprintScan::default();
        assert_eq!(scan.finalize(), Err(ValidationError::ScanNotVerified));

        scan.start();
        assert_eq!(scan.finalize(), Err(ValidationError::ScanNotVerified));

        scan.add_progress(100.0);
        assert!(scan.finalize().is_ok());
        assert!(scan.is_finalized());
        assert!(scan.finalize().is_err());
    }

    #[test]
    fn test_non_finite_increment_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut scan = FingerprintScan::new(bad);
            assert!(scan.start());
            scan.tick(&mut rng);
            assert!(scan.progress() < DEFAULT_MAX_INCREMENT);
        }
    }

    #[test]
    fn test_summary_formats_timestamp() {
        let at = Local.with_ymd_and_hms(2025, 3, 14, 9, 5, 7).unwrap();
        let summary = VoteSummary::at(at);
        assert_eq!(summary.date, "14/03/2025");
        assert_eq!(summary.time, "09:05:07");
        assert_eq!(summary.voter_id, "VOTER-2025-78901");
    }
}

//! One time password entry with a resend countdown.
//!
//! Nothing is checked against a real code: six filled digit slots open the
//! gate.

use super::ValidationError;

pub const OTP_LENGTH: usize = 6;

/// Default resend lockout, in seconds.
pub const DEFAULT_RESEND_SECS: u32 = 60;

/// Seconds left until the OTP may be resent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// One second elapsed. Returns `true` on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

#[derive(Debug, Clone)]
pub struct OtpForm {
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
    countdown: Countdown,
    resend_secs: u32,
    resend_count: u32,
}

impl OtpForm {
    pub fn new(resend_secs: u32) -> Self {
        Self {
            digits: [None; OTP_LENGTH],
            focus: 0,
            countdown: Countdown::new(resend_secs),
            resend_secs,
            resend_count: 0,
        }
    }

    pub fn digits(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.digits
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn resend_count(&self) -> u32 {
        self.resend_count
    }

    pub fn filled(&self) -> usize {
        self.digits.iter().filter(|d| d.is_some()).count()
    }

    /// The entered code, with gaps skipped.
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    /// Type into the focused slot. Non-digits are ignored. A digit moves
    /// focus to the next slot.
    pub fn input_char(&mut self, c: char) -> bool {
        self.set_digit(self.focus, c)
    }

    /// Put `c` into slot `index`. Returns whether the input was accepted.
    pub fn set_digit(&mut self, index: usize, c: char) -> bool {
        if index >= OTP_LENGTH || !c.is_ascii_digit() {
            return false;
        }
        self.digits[index] = Some(c);
        self.focus = (index + 1).min(OTP_LENGTH - 1);
        true
    }

    /// Clear the focused slot, or step back to the previous slot when the
    /// focused one is already empty.
    pub fn backspace(&mut self) {
        if self.digits[self.focus].is_some() {
            self.digits[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
        }
    }

    pub fn focus_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_right(&mut self) {
        self.focus = (self.focus + 1).min(OTP_LENGTH - 1);
    }

    /// Fill slots from a pasted string.
    ///
    /// Accepted only when the trimmed text is all digits and at most six
    /// long. Focus moves to the first empty slot, or the last slot when all
    /// are filled.
    pub fn paste(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || text.len() > OTP_LENGTH || !text.chars().all(|c| c.is_ascii_digit()) {
            log::debug!("Ignoring OTP paste of {} chars", text.chars().count());
            return false;
        }
        for (slot, c) in self.digits.iter_mut().zip(text.chars()) {
            *slot = Some(c);
        }
        self.focus = self
            .digits
            .iter()
            .position(Option::is_none)
            .unwrap_or(OTP_LENGTH - 1);
        true
    }

    pub fn can_resend(&self) -> bool {
        self.countdown.is_expired()
    }

    /// One second of the resend countdown elapsed. Returns `true` when the
    /// countdown just ran out.
    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    /// Clear the code and restart the countdown. Only allowed once the
    /// countdown has expired.
    pub fn resend(&mut self) -> bool {
        if !self.can_resend() {
            return false;
        }
        self.digits = [None; OTP_LENGTH];
        self.focus = 0;
        self.countdown = Countdown::new(self.resend_secs);
        self.resend_count += 1;
        log::info!("OTP resend requested (#{})", self.resend_count);
        true
    }

    /// Gate: every slot holds a digit.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let filled = self.filled();
        if filled < OTP_LENGTH {
            return Err(ValidationError::IncompleteOtp {
                filled,
                expected: OTP_LENGTH,
            });
        }
        Ok(())
    }
}

impl Default for OtpForm {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_with(code: &str) -> OtpForm {
        let mut form = OtpForm::default();
        for (i, c) in code.chars().enumerate() {
            form.set_digit(i, c);
        }
        form
    }

    #[test]
    fn test_six_digits_open_gate() {
        let form = filled_with("123456");
        assert!(form.is_valid());
        assert_eq!(form.code(), "123456");
    }

    #[test]
    fn test_any_empty_slot_closes_gate() {
        for gap in 0..OTP_LENGTH {
            let mut form = filled_with("123456");
            form.focus = gap;
            form.backspace();
            assert!(!form.is_valid(), "gap at {gap} should close the gate");
            assert_eq!(
                form.validate(),
                Err(ValidationError::IncompleteOtp { filled: 5, expected: 6 })
            );
        }
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut form = OtpForm::default();
        assert!(!form.input_char('a'));
        assert!(!form.input_char('-'));
        assert_eq!(form.filled(), 0);
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_digit_advances_focus() {
        let mut form = OtpForm::default();
        form.input_char('4');
        form.input_char('2');
        assert_eq!(form.focus(), 2);
        assert_eq!(form.code(), "42");
    }

    #[test]
    fn test_focus_stays_on_last_slot() {
        let mut form = filled_with("12345");
        form.input_char('6');
        assert_eq!(form.focus(), OTP_LENGTH - 1);
        form.input_char('9');
        assert_eq!(form.code(), "123459");
    }

    #[test]
    fn test_backspace_on_empty_moves_back() {
        let mut form = OtpForm::default();
        form.input_char('1');
        assert_eq!(form.focus(), 1);
        form.backspace();
        assert_eq!(form.focus(), 0);
        assert_eq!(form.filled(), 1);
        form.backspace();
        assert_eq!(form.filled(), 0);
    }

    #[test]
    fn test_paste_full_code() {
        let mut form = OtpForm::default();
        assert!(form.paste(" 654321 "));
        assert!(form.is_valid());
        assert_eq!(form.focus(), OTP_LENGTH - 1);
    }

    #[test]
    fn test_paste_partial_code_focuses_first_gap() {
        let mut form = OtpForm::default();
        assert!(form.paste("987"));
        assert_eq!(form.code(), "987");
        assert_eq!(form.focus(), 3);
    }

    #[test]
    fn test_paste_rejects_bad_input() {
        let mut form = OtpForm::default();
        assert!(!form.paste("12a456"));
        assert!(!form.paste("1234567"));
        assert!(!form.paste("   "));
        assert_eq!(form.filled(), 0);
    }

    #[test]
    fn test_countdown_gates_resend() {
        let mut form = OtpForm::new(3);
        form.input_char('1');
        assert!(!form.can_resend());
        assert!(!form.resend());

        assert!(!form.tick());
        assert!(!form.tick());
        assert!(form.tick());
        assert!(!form.tick());
        assert!(form.can_resend());

        assert!(form.resend());
        assert_eq!(form.filled(), 0);
        assert_eq!(form.focus(), 0);
        assert_eq!(form.countdown().remaining(), 3);
        assert_eq!(form.resend_count(), 1);
    }
}

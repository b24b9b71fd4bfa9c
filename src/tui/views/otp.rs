use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::steps::otp::OTP_LENGTH;
use crate::core::steps::OtpForm;
use crate::core::timer::{owned_by, ScopedTimer, TimerKind, TimerTick};
use crate::tui::events::{AppEvent, NotificationLevel};
use crate::tui::services::Services;

use super::super::theme;
use super::{button_line, hint_line, key_press, StepOutcome};

/// Six digit slots plus a resend countdown driven by a one-second timer.
pub struct OtpView {
    form: OtpForm,
    countdown: Option<ScopedTimer>,
}

impl OtpView {
    pub fn new(services: &Services) -> Self {
        let form = OtpForm::new(services.wizard().otp_resend_secs);
        let mut view = Self {
            form,
            countdown: None,
        };
        view.start_countdown(services);
        view
    }

    pub fn form(&self) -> &OtpForm {
        &self.form
    }

    /// Whether the countdown timer is still running.
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    fn start_countdown(&mut self, services: &Services) {
        self.countdown = if self.form.countdown().is_expired() {
            None
        } else {
            Some(ScopedTimer::interval(
                Duration::from_secs(1),
                TimerKind::ResendCountdown,
                services.event_tx.clone(),
                AppEvent::Timer,
            ))
        };
    }

    pub fn on_timer(&mut self, tick: &TimerTick) -> StepOutcome {
        if !owned_by(&self.countdown, tick) {
            return StepOutcome::Ignored;
        }
        if self.form.tick() {
            log::debug!("OTP resend unlocked");
            self.countdown = None;
        }
        StepOutcome::Consumed
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> StepOutcome {
        if let Event::Paste(text) = event {
            self.form.paste(text);
            return StepOutcome::Consumed;
        }

        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.form.input_char(c);
                StepOutcome::Consumed
            }
            KeyCode::Backspace => {
                self.form.backspace();
                StepOutcome::Consumed
            }
            KeyCode::Left => {
                self.form.focus_left();
                StepOutcome::Consumed
            }
            KeyCode::Right => {
                self.form.focus_right();
                StepOutcome::Consumed
            }
            KeyCode::Char('r') => {
                if self.form.resend() {
                    services.notify("A new OTP has been sent", NotificationLevel::Info);
                    self.start_countdown(services);
                }
                StepOutcome::Consumed
            }
            KeyCode::Enter => {
                if self.form.is_valid() {
                    log::info!("OTP accepted");
                    StepOutcome::Advance
                } else {
                    StepOutcome::Consumed
                }
            }
            _ => StepOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("OTP Verification");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Slots
            Constraint::Length(1), // Countdown / resend
            Constraint::Length(1), // Gate hint
            Constraint::Length(1), // Verify
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter the 6-digit code sent to your mobile number",
                theme::muted(),
            )),
            chunks[0],
        );

        frame.render_widget(Paragraph::new(self.slot_lines()).centered(), chunks[1]);

        let countdown = self.form.countdown();
        let resend = if countdown.is_expired() {
            Line::from(vec![
                Span::raw("Didn't receive it? "),
                Span::styled("r", theme::highlight()),
                Span::raw(" to resend"),
            ])
        } else {
            Line::from(Span::styled(
                format!("Resend OTP in {}s", countdown.remaining()),
                theme::dim(),
            ))
        };
        frame.render_widget(Paragraph::new(resend).centered(), chunks[2]);

        let reason = self.form.validate().err().map(|e| e.to_string());
        frame.render_widget(Paragraph::new(hint_line(reason)), chunks[3]);
        frame.render_widget(
            Paragraph::new(button_line("Verify OTP", self.form.is_valid(), true)),
            chunks[4],
        );
    }

    fn slot_lines(&self) -> Vec<Line<'static>> {
        let mut top = Vec::with_capacity(OTP_LENGTH);
        let mut mid = Vec::with_capacity(OTP_LENGTH);
        let mut bottom = Vec::with_capacity(OTP_LENGTH);
        for (i, digit) in self.form.digits().iter().enumerate() {
            let style = if i == self.form.focus() {
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
            } else {
                theme::border_default()
            };
            let c = digit.unwrap_or(' ');
            top.push(Span::styled("┌───┐ ", style));
            mid.push(Span::styled(format!("│ {c} │ "), style));
            bottom.push(Span::styled("└───┘ ", style));
        }
        vec![Line::from(top), Line::from(mid), Line::from(bottom)]
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    use crate::config::AppConfig;

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn services(resend_secs: u32) -> (Services, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut config = AppConfig::default();
        config.wizard.otp_resend_secs = resend_secs;
        (Services::new(config, tx), rx)
    }

    #[tokio::test]
    async fn test_digits_fill_and_enter_advances() {
        let (services, _rx) = services(60);
        let mut view = OtpView::new(&services);
        assert!(view.is_counting_down());

        for c in "12345".chars() {
            view.handle_input(&key(KeyCode::Char(c)), &services);
        }
        assert_eq!(view.handle_input(&key(KeyCode::Enter), &services), StepOutcome::Consumed);
        view.handle_input(&key(KeyCode::Char('6')), &services);
        assert_eq!(view.handle_input(&key(KeyCode::Enter), &services), StepOutcome::Advance);
    }

    #[tokio::test]
    async fn test_paste_fills_slots() {
        let (services, _rx) = services(60);
        let mut view = OtpView::new(&services);
        view.handle_input(&Event::Paste(" 654321 ".into()), &services);
        assert_eq!(view.form().code(), "654321");
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_until_resend() {
        let (services, mut rx) = services(2);
        let mut view = OtpView::new(&services);

        for _ in 0..2 {
            match rx.recv().await {
                Some(AppEvent::Timer(tick)) => {
                    assert_eq!(view.on_timer(&tick), StepOutcome::Consumed)
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(view.form().can_resend());
        assert!(!view.is_counting_down());

        assert_eq!(view.handle_input(&key(KeyCode::Char('r')), &services), StepOutcome::Consumed);
        assert_eq!(view.form().resend_count(), 1);
        assert!(view.is_counting_down());
    }

    #[tokio::test]
    async fn test_foreign_tick_ignored() {
        let (services, _rx) = services(60);
        let mut view = OtpView::new(&services);
        let (tx, _other_rx) = mpsc::unbounded_channel::<TimerTick>();
        let stranger = ScopedTimer::once(Duration::from_secs(60), TimerKind::ResendCountdown, tx, |t| t);
        let tick = TimerTick {
            token: stranger.token(),
            kind: TimerKind::ResendCountdown,
        };
        assert_eq!(view.on_timer(&tick), StepOutcome::Ignored);
        assert_eq!(view.form().countdown().remaining(), 60);
    }

    #[tokio::test]
    async fn test_zero_lockout_starts_without_timer() {
        let (services, _rx) = services(0);
        let view = OtpView::new(&services);
        assert!(!view.is_counting_down());
        assert!(view.form().can_resend());
    }
}

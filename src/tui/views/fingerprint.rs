use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::core::steps::{FingerprintScan, ScanState};
use crate::core::timer::{owned_by, ScopedTimer, TimerKind, TimerTick};
use crate::tui::events::{AppEvent, NotificationLevel};
use crate::tui::services::Services;

use super::super::theme;
use super::{button_line, key_press, StepOutcome};

/// Fingerprint scan, vote finalization and the delayed completion signal.
pub struct FingerprintView {
    scan: FingerprintScan,
    rng: StdRng,
    scan_interval: Duration,
    completion_delay: Duration,
    scan_timer: Option<ScopedTimer>,
    completion_timer: Option<ScopedTimer>,
}

impl FingerprintView {
    pub fn new(services: &Services) -> Self {
        let wizard = services.wizard();
        Self {
            scan: FingerprintScan::new(wizard.scan_max_increment),
            rng: StdRng::from_entropy(),
            scan_interval: wizard.scan_interval(),
            completion_delay: wizard.completion_delay(),
            scan_timer: None,
            completion_timer: None,
        }
    }

    pub fn scan(&self) -> &FingerprintScan {
        &self.scan
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_timer.is_some()
    }

    /// Whether completion has been scheduled but not yet signalled.
    pub fn is_completion_pending(&self) -> bool {
        self.completion_timer.is_some()
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> StepOutcome {
        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };
        if !matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            return StepOutcome::Ignored;
        }

        match self.scan.state() {
            ScanState::Idle => {
                if self.scan.start() {
                    self.scan_timer = Some(ScopedTimer::interval(
                        self.scan_interval,
                        TimerKind::ScanProgress,
                        services.event_tx.clone(),
                        AppEvent::Timer,
                    ));
                }
            }
            ScanState::Success if !self.scan.is_finalized() => {
                if self.scan.finalize().is_ok() {
                    services.notify("Your vote has been cast successfully", NotificationLevel::Success);
                    self.completion_timer = Some(ScopedTimer::once(
                        self.completion_delay,
                        TimerKind::CompletionDelay,
                        services.event_tx.clone(),
                        AppEvent::Timer,
                    ));
                }
            }
            _ => {}
        }
        StepOutcome::Consumed
    }

    pub fn on_timer(&mut self, tick: &TimerTick) -> StepOutcome {
        if owned_by(&self.scan_timer, tick) {
            self.scan.tick(&mut self.rng);
            if !self.scan.needs_ticks() {
                self.scan_timer = None;
            }
            return StepOutcome::Consumed;
        }
        if owned_by(&self.completion_timer, tick) {
            self.completion_timer = None;
            return StepOutcome::Complete;
        }
        StepOutcome::Ignored
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Fingerprint Verification");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.scan.is_finalized() {
            self.render_success(frame, inner);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // State message
            Constraint::Length(1), // Progress
            Constraint::Length(1),
            Constraint::Length(6), // Vote summary
            Constraint::Length(1), // Finalize
            Constraint::Min(0),
        ])
        .split(inner);

        let state = self.scan.state();
        let message_style = match state {
            ScanState::Idle => theme::muted(),
            ScanState::Scanning => Style::default().fg(theme::INFO),
            ScanState::Error => Style::default().fg(theme::ERROR),
            ScanState::Success => theme::success(),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(state.message(), message_style)),
            chunks[0],
        );

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme::ACCENT).bg(theme::BG_BASE))
            .ratio((self.scan.progress() / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", self.scan.progress()));
        frame.render_widget(gauge, chunks[1]);

        let summary = self.scan.summary();
        let summary_lines = vec![
            Line::from(Span::styled("Vote Summary", theme::heading())),
            Line::from(vec![Span::styled("Party:    ", theme::muted()), Span::raw(summary.party)]),
            Line::from(vec![Span::styled("Voter ID: ", theme::muted()), Span::raw(summary.voter_id)]),
            Line::from(vec![Span::styled("Date:     ", theme::muted()), Span::raw(summary.date.clone())]),
            Line::from(vec![Span::styled("Time:     ", theme::muted()), Span::raw(summary.time.clone())]),
        ];
        frame.render_widget(Paragraph::new(summary_lines), chunks[3]);

        frame.render_widget(
            Paragraph::new(button_line("Finalize & Cast Vote", self.scan.is_valid(), self.scan.is_valid())),
            chunks[4],
        );
    }

    fn render_success(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                "✓ Vote Cast Successfully!",
                Style::default().fg(theme::SUCCESS).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Thank you for participating in the democratic process.",
                theme::muted(),
            )),
            Line::from(Span::styled(
                format!("Voter ID: {}", self.scan.summary().voter_id),
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    use crate::config::AppConfig;

    use super::*;

    fn enter() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_finalize_complete() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let services = Services::new(AppConfig::default(), tx);
        let mut view = FingerprintView::new(&services);

        // Finalize is not available before scanning
        assert_eq!(view.scan().state(), ScanState::Idle);
        view.handle_input(&enter(), &services);
        assert!(view.is_scanning());

        while view.is_scanning() {
            match rx.recv().await {
                Some(AppEvent::Timer(tick)) => {
                    assert_eq!(view.on_timer(&tick), StepOutcome::Consumed);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(view.scan().state(), ScanState::Success);
        assert_eq!(view.scan().progress(), 100.0);

        view.handle_input(&enter(), &services);
        assert!(view.scan().is_finalized());
        assert!(view.is_completion_pending());

        let mut completions = 0;
        while view.is_completion_pending() {
            match rx.recv().await {
                Some(AppEvent::Timer(tick)) => {
                    if view.on_timer(&tick) == StepOutcome::Complete {
                        completions += 1;
                    }
                }
                Some(AppEvent::Notification(_)) => {}
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(completions, 1);

        // Further input does not schedule another completion
        view.handle_input(&enter(), &services);
        assert!(!view.is_completion_pending());
    }

    #[tokio::test]
    async fn test_other_keys_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let services = Services::new(AppConfig::default(), tx);
        let mut view = FingerprintView::new(&services);
        let key = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(view.handle_input(&key, &services), StepOutcome::Ignored);
        assert!(!view.is_scanning());
    }
}

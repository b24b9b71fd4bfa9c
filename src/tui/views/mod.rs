//! Per-step views. Each owns exactly one core step form plus whatever
//! timers or devices that step needs; replacing the view releases them.

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::timer::TimerTick;
use crate::core::wizard::{Aside, StepDefinition, WizardStep};

use super::services::Services;
use super::theme;

pub mod face;
pub mod fingerprint;
pub mod introduction;
pub mod otp;
pub mod registration;
pub mod review;
pub mod voting;

use face::FaceView;
use fingerprint::FingerprintView;
use introduction::IntroductionView;
use otp::OtpView;
use registration::RegistrationView;
use review::ReviewView;
use voting::VotingView;

/// What a step view wants the app to do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Handled; nothing else to do.
    Consumed,
    /// Not for this view; fall through to global bindings.
    Ignored,
    /// The step's gate holds and the user asked to move on.
    Advance,
    /// The terminal step finished.
    Complete,
}

/// The active step's view.
pub enum StepView {
    Introduction(IntroductionView),
    Registration(RegistrationView),
    Otp(OtpView),
    Review(ReviewView),
    Voting(VotingView),
    Face(FaceView),
    Fingerprint(FingerprintView),
}

impl StepView {
    /// Build a fresh view for `step`. Timers the view needs start here.
    pub fn for_step(step: WizardStep, services: &Services) -> Self {
        match step {
            WizardStep::Introduction => StepView::Introduction(IntroductionView::new()),
            WizardStep::Registration => StepView::Registration(RegistrationView::new()),
            WizardStep::OtpVerification => StepView::Otp(OtpView::new(services)),
            WizardStep::VerifyDetails => StepView::Review(ReviewView::new()),
            WizardStep::Voting => StepView::Voting(VotingView::new()),
            WizardStep::FaceVerification => StepView::Face(FaceView::new(services)),
            WizardStep::FingerprintVote => StepView::Fingerprint(FingerprintView::new(services)),
        }
    }

    pub fn step(&self) -> WizardStep {
        match self {
            StepView::Introduction(_) => WizardStep::Introduction,
            StepView::Registration(_) => WizardStep::Registration,
            StepView::Otp(_) => WizardStep::OtpVerification,
            StepView::Review(_) => WizardStep::VerifyDetails,
            StepView::Voting(_) => WizardStep::Voting,
            StepView::Face(_) => WizardStep::FaceVerification,
            StepView::Fingerprint(_) => WizardStep::FingerprintVote,
        }
    }

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> StepOutcome {
        match self {
            StepView::Introduction(view) => view.handle_input(event),
            StepView::Registration(view) => view.handle_input(event),
            StepView::Otp(view) => view.handle_input(event, services),
            StepView::Review(view) => view.handle_input(event),
            StepView::Voting(view) => view.handle_input(event),
            StepView::Face(view) => view.handle_input(event),
            StepView::Fingerprint(view) => view.handle_input(event, services),
        }
    }

    /// Route a timer tick. Ticks the view does not own are ignored.
    pub fn on_timer(&mut self, tick: &TimerTick) -> StepOutcome {
        match self {
            StepView::Otp(view) => view.on_timer(tick),
            StepView::Fingerprint(view) => view.on_timer(tick),
            _ => StepOutcome::Ignored,
        }
    }

    /// Whether printable keys belong to a text field right now, so global
    /// single-letter bindings must not fire.
    pub fn captures_text(&self) -> bool {
        match self {
            StepView::Registration(view) => view.captures_text(),
            _ => false,
        }
    }

    /// Key hints for the status bar.
    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            StepView::Introduction(_) => &[("Enter", "get started")],
            StepView::Registration(_) => &[("Tab", "next field"), ("Enter", "attach/submit")],
            StepView::Otp(_) => &[("0-9", "digit"), ("←/→", "slot"), ("r", "resend"), ("Enter", "verify")],
            StepView::Review(_) => &[("j/k", "scroll"), ("Enter", "generate link")],
            StepView::Voting(_) => &[("j/k", "move"), ("Space", "select"), ("c", "cast")],
            StepView::Face(_) => &[("s", "camera"), ("Space", "capture"), ("b", "back"), ("Enter", "continue")],
            StepView::Fingerprint(_) => &[("Enter", "scan/finalize")],
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            StepView::Introduction(view) => view.render(frame, area),
            StepView::Registration(view) => view.render(frame, area),
            StepView::Otp(view) => view.render(frame, area),
            StepView::Review(view) => view.render(frame, area),
            StepView::Voting(view) => view.render(frame, area),
            StepView::Face(view) => view.render(frame, area),
            StepView::Fingerprint(view) => view.render(frame, area),
        }
    }
}

// ── Shared helpers ──────────────────────────────────────────────────────────

/// The key event behind `event`, if it is a key press.
pub(super) fn key_press(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

/// A `[ label ]` button line.
pub(super) fn button_line(label: &str, enabled: bool, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    Line::from(vec![
        Span::styled(marker, theme::highlight()),
        Span::styled(format!("[ {label} ]"), theme::button(enabled)),
    ])
}

/// Inline gate hint: a warning when `reason` is present.
pub(super) fn hint_line(reason: Option<String>) -> Line<'static> {
    match reason {
        Some(reason) => Line::from(Span::styled(format!("  {reason}"), theme::warning())),
        None => Line::raw(""),
    }
}

/// Render the side panel of a step: illustration, heading, info cards.
pub fn render_aside(frame: &mut Frame, area: Rect, definition: &StepDefinition) {
    let block = theme::block_default(definition.aside.heading);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let art_height = definition.illustration.len() as u16;
    let rows = Layout::vertical([Constraint::Length(art_height + 1), Constraint::Min(0)]).split(inner);

    let art: Vec<Line> = definition
        .illustration
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(theme::PRIMARY_LIGHT))))
        .collect();
    frame.render_widget(Paragraph::new(art).centered(), rows[0]);

    frame.render_widget(
        Paragraph::new(aside_lines(&definition.aside)).wrap(Wrap { trim: true }),
        rows[1],
    );
}

/// Text of the info cards, numbered when the aside is a procedure.
pub fn aside_lines(aside: &Aside) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(aside.cards.len() * 3);
    for (i, card) in aside.cards.iter().enumerate() {
        let title = if aside.numbered {
            format!("{}. {}", i + 1, card.title)
        } else {
            format!("• {}", card.title)
        };
        lines.push(Line::from(Span::styled(title, theme::heading())));
        lines.push(Line::from(Span::styled(card.body, theme::muted())));
        lines.push(Line::raw(""));
    }
    lines
}

#[cfg(test)]
mod tests {
    use crate::core::wizard::STEP_TABLE;

    use super::*;

    #[test]
    fn test_aside_lines_number_procedures() {
        for def in &STEP_TABLE {
            let lines = aside_lines(&def.aside);
            assert_eq!(lines.len(), def.aside.cards.len() * 3);
            let first = lines[0].spans[0].content.to_string();
            if def.aside.numbered {
                assert!(first.starts_with("1. "), "{first}");
            } else {
                assert!(first.starts_with("• "), "{first}");
            }
        }
    }

    #[test]
    fn test_hint_line_empty_when_open() {
        assert!(hint_line(None).spans.is_empty());
        assert!(!hint_line(Some("nope".into())).spans.is_empty());
    }
}

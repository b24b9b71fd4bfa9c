use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use super::{button_line, key_press, StepOutcome};

/// Welcome screen. Its gate is always open.
#[derive(Debug, Default)]
pub struct IntroductionView;

impl IntroductionView {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_input(&mut self, event: &Event) -> StepOutcome {
        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => StepOutcome::Advance,
            _ => StepOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Welcome");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Min(4), Constraint::Length(1)]).split(inner);

        let body = vec![
            Line::raw(""),
            Line::from(Span::styled("Empowering every citizen", theme::heading())),
            Line::raw(""),
            Line::from(Span::styled(
                "Register, verify your identity and cast your ballot in a few guided steps. \
                 You will need your mobile phone, an identity document and a camera.",
                theme::muted(),
            )),
        ];
        frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), chunks[0]);
        frame.render_widget(Paragraph::new(button_line("Get Started", true, true)), chunks[1]);
    }
}

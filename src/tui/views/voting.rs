use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::steps::voting::PARTIES;
use crate::core::steps::Ballot;

use super::super::theme;
use super::{button_line, hint_line, key_press, StepOutcome};

/// Party list with a cursor. The row after the last party is the
/// "Cast Vote" button.
#[derive(Debug, Default)]
pub struct VotingView {
    ballot: Ballot,
    cursor: usize,
}

impl VotingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    fn on_button(&self) -> bool {
        self.cursor == PARTIES.len()
    }

    fn cast(&self) -> StepOutcome {
        match self.ballot.selected_party() {
            Some(party) => {
                log::info!("Vote cast for {}", party.name);
                StepOutcome::Advance
            }
            None => StepOutcome::Consumed,
        }
    }

    pub fn handle_input(&mut self, event: &Event) -> StepOutcome {
        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.cursor = (self.cursor + 1).min(PARTIES.len());
                StepOutcome::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.cursor = self.cursor.saturating_sub(1);
                StepOutcome::Consumed
            }
            KeyCode::Char('c') => self.cast(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.on_button() {
                    return self.cast();
                }
                if let Some(party) = PARTIES.get(self.cursor) {
                    self.ballot.select(party.id);
                }
                StepOutcome::Consumed
            }
            _ => StepOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Cast Your Vote");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Min(PARTIES.len() as u16),
            Constraint::Length(1), // Gate hint
            Constraint::Length(1), // Cast Vote
        ])
        .split(inner);

        let selected = self.ballot.selected();
        let items: Vec<ListItem> = PARTIES
            .iter()
            .map(|party| {
                let radio = if selected == Some(party.id) { "(●)" } else { "( )" };
                let badge = Style::default()
                    .fg(theme::BG_BASE)
                    .bg(theme::party_color(party.color))
                    .add_modifier(Modifier::BOLD);
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{radio} ")),
                    Span::styled(format!(" {:<2} ", party.logo), badge),
                    Span::raw(format!(" {}", party.name)),
                    Span::styled("  View manifesto", theme::dim()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("▸ ");
        let mut state = ListState::default();
        if !self.on_button() {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let reason = self.ballot.validate().err().map(|e| e.to_string());
        frame.render_widget(Paragraph::new(hint_line(reason)), chunks[1]);
        frame.render_widget(
            Paragraph::new(button_line("Cast Vote", self.ballot.is_valid(), self.on_button())),
            chunks[2],
        );
    }
}

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::core::steps::ReviewStep;

use super::super::theme;
use super::{button_line, key_press, StepOutcome};

fn eligibility(eligible: bool) -> Span<'static> {
    if eligible {
        Span::styled("Eligible", theme::success())
    } else {
        Span::styled("Not eligible", Style::default().fg(theme::ERROR))
    }
}

/// Read-only voter record and candidate list.
#[derive(Debug, Default)]
pub struct ReviewView {
    step: ReviewStep,
    scroll: usize,
}

impl ReviewView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_input(&mut self, event: &Event) -> StepOutcome {
        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };
        let last = self.step.candidates().len().saturating_sub(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(last);
                StepOutcome::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                StepOutcome::Consumed
            }
            KeyCode::Enter if self.step.is_valid() => {
                log::info!("Voting link generated");
                StepOutcome::Advance
            }
            _ => StepOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Verify Details");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(5), // Voter
            Constraint::Min(4),    // Candidates
            Constraint::Length(1), // Action
        ])
        .split(inner);

        let voter = self.step.voter();
        let voter_lines = vec![
            Line::from(Span::styled("Your Details", theme::heading())),
            Line::from(vec![Span::styled("Name: ", theme::muted()), Span::raw(voter.name)]),
            Line::from(vec![Span::styled("Age:  ", theme::muted()), Span::raw(voter.age.to_string())]),
            Line::from(vec![Span::styled("Status: ", theme::muted()), eligibility(voter.eligible)]),
        ];
        frame.render_widget(Paragraph::new(voter_lines), chunks[0]);

        let header = Row::new(["ID", "Name", "Age", "Party", "Status"].map(|h| {
            Cell::from(h).style(Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD))
        }))
        .height(1);

        let rows = self.step.candidates().iter().map(|c| {
            Row::new(vec![
                Cell::from(c.id.to_string()),
                Cell::from(c.name),
                Cell::from(c.age.to_string()),
                Cell::from(c.party),
                Cell::from(Line::from(eligibility(c.eligible))),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(30),
                Constraint::Length(5),
                Constraint::Percentage(35),
                Constraint::Min(8),
            ],
        )
        .header(header)
        .block(theme::block_default("Candidates"))
        .row_highlight_style(theme::highlight());

        let mut state = TableState::default().with_selected(Some(self.scroll));
        frame.render_stateful_widget(table, chunks[1], &mut state);

        frame.render_widget(
            Paragraph::new(button_line("Generate Voting Link", self.step.is_valid(), true)),
            chunks[2],
        );
    }
}

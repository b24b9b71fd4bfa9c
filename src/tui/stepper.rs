//! Progress stepper: one marker per step plus a fill gauge.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::core::wizard::{StepStatus, WizardStep, STEP_COUNT};

use super::theme;

/// Below this width the stepper drops the labels and shows numbers only.
pub const COMPACT_THRESHOLD: u16 = 84;

/// Marker text for one step: a check for finished steps, the 1-based
/// number otherwise.
pub fn marker(step: WizardStep, current: WizardStep) -> String {
    match StepStatus::of(step, current) {
        StepStatus::Done => "✓".to_string(),
        StepStatus::Current | StepStatus::Pending => (step.index() + 1).to_string(),
    }
}

/// Build the marker row for `current`.
pub fn marker_line(current: WizardStep, compact: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(STEP_COUNT * 2);
    for (i, step) in WizardStep::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(if compact { "─" } else { " ── " }, theme::dim()));
        }
        let style = theme::step_status(StepStatus::of(step, current));
        let text = if compact {
            format!("({})", marker(step, current))
        } else {
            format!("({}) {}", marker(step, current), step.label())
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

/// Render the stepper into `area` (expects at least two rows).
pub fn render(frame: &mut Frame, area: Rect, current: WizardStep, ratio: f64) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let compact = area.width < COMPACT_THRESHOLD;
    frame.render_widget(Paragraph::new(marker_line(current, compact)).centered(), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::PRIMARY).bg(theme::BG_BASE))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("Step {} of {}", current.index() + 1, STEP_COUNT));
    frame.render_widget(gauge, rows[1]);
}

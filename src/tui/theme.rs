//! Centralized Indigo & Saffron color theme for the voting TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::steps::voting::PartyColor;
use crate::core::wizard::StepStatus;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo: primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x3F, 0x51, 0xB5);
/// Light indigo: highlights, hints, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x79, 0x86, 0xCB);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Saffron: calls to action, the current step.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x99, 0x33);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Navy: base background.
pub const BG_BASE: Color = Color::Rgb(0x0D, 0x12, 0x2B);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Muted text: secondary labels, borders.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text: disabled items, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Badge color of a party logo.
pub fn party_color(color: PartyColor) -> Color {
    match color {
        PartyColor::Blue => Color::Rgb(0x1E, 0x88, 0xE5),
        PartyColor::Red => Color::Rgb(0xE5, 0x39, 0x35),
        PartyColor::Green => Color::Rgb(0x43, 0xA0, 0x47),
        PartyColor::Yellow => Color::Rgb(0xFD, 0xD8, 0x35),
        PartyColor::Purple => Color::Rgb(0x8E, 0x24, 0xAA),
    }
}

/// Progress stepper style for a step relative to the current one.
pub fn step_status(status: StepStatus) -> Style {
    match status {
        StepStatus::Done => Style::default().fg(SUCCESS),
        StepStatus::Current => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        StepStatus::Pending => Style::default().fg(TEXT_DIM),
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "Enter:continue").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Primary action button. Disabled buttons render dim.
pub fn button(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(BG_BASE)
            .bg(PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
    }
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn success() -> Style {
    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

/// Focused or default block depending on `focused`.
pub fn block(title: &str, focused: bool) -> Block<'_> {
    if focused {
        block_focused(title)
    } else {
        block_default(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_indigo() {
        assert_eq!(PRIMARY, Color::Rgb(0x3F, 0x51, 0xB5));
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        assert_ne!(title(), Style::default());
        assert_ne!(heading(), Style::default());
        assert_ne!(highlight(), Style::default());
        assert_ne!(brand_badge(), Style::default());
    }

    #[test]
    fn test_button_enabled_differs_from_disabled() {
        assert_ne!(button(true), button(false));
    }

    #[test]
    fn test_step_status_styles_distinct() {
        let done = step_status(StepStatus::Done);
        let current = step_status(StepStatus::Current);
        let pending = step_status(StepStatus::Pending);
        assert_ne!(done, current);
        assert_ne!(current, pending);
        assert_ne!(done, pending);
    }

    #[test]
    fn test_party_colors_distinct() {
        let colors = [
            PartyColor::Blue,
            PartyColor::Red,
            PartyColor::Green,
            PartyColor::Yellow,
            PartyColor::Purple,
        ]
        .map(party_color);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

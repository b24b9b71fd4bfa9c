//! Root layout computation: header, progress stepper, form + side panel,
//! status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the title/subtitle header.
pub const HEADER_HEIGHT: u16 = 3;
/// Height of the progress stepper (labels + gauge).
pub const STEPPER_HEIGHT: u16 = 3;
/// Width of the side panel when shown.
pub const ASIDE_WIDTH: u16 = 38;
/// Hide the side panel below this terminal width.
pub const HIDE_ASIDE_THRESHOLD: u16 = 90;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub stepper: Rect,
    /// Active step's form.
    pub form: Rect,
    /// Side panel (None if the terminal is too narrow).
    pub aside: Option<Rect>,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(STEPPER_HEIGHT),
            Constraint::Min(1),    // Form (+ aside)
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let (header, stepper, body, status) = (rows[0], rows[1], rows[2], rows[3]);

        let (form, aside) = if area.width < HIDE_ASIDE_THRESHOLD {
            (body, None)
        } else {
            let cols = Layout::horizontal([Constraint::Min(1), Constraint::Length(ASIDE_WIDTH)])
                .split(body);
            (cols[0], Some(cols[1]))
        };

        AppLayout {
            header,
            stepper,
            form,
            aside,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_layout_has_aside() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = AppLayout::compute(area);
        assert_eq!(layout.aside.map(|a| a.width), Some(ASIDE_WIDTH));
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.stepper.height, STEPPER_HEIGHT);
    }

    #[test]
    fn test_narrow_layout_hides_aside() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = AppLayout::compute(area);
        assert!(layout.aside.is_none());
        assert_eq!(layout.form.width, 80);
    }

    #[test]
    fn test_form_plus_aside_fills_width() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::compute(area);
        let aside_w = layout.aside.map(|s| s.width).unwrap_or(0);
        assert_eq!(aside_w + layout.form.width, area.width);
    }

    #[test]
    fn test_rows_stack_to_full_height() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::compute(area);
        let total = layout.header.height
            + layout.stepper.height
            + layout.form.height
            + layout.status.height;
        assert_eq!(total, area.height);
    }
}

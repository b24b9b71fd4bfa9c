use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::document::{DocumentHandle, ACCEPTED_EXTENSIONS};
use crate::core::steps::RegistrationForm;
use crate::tui::widgets::input_buffer::{digits_only, phone_chars, InputBuffer};

use super::super::theme;
use super::{button_line, hint_line, key_press, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    FullName,
    Age,
    Mobile,
    Document,
    Submit,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 5] = [
        RegistrationField::FullName,
        RegistrationField::Age,
        RegistrationField::Mobile,
        RegistrationField::Document,
        RegistrationField::Submit,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            RegistrationField::FullName => "Full Name",
            RegistrationField::Age => "Age",
            RegistrationField::Mobile => "Mobile Number",
            RegistrationField::Document => "Aadhaar Card (path to .pdf/.jpg/.png)",
            RegistrationField::Submit => "Submit",
        }
    }
}

pub struct RegistrationView {
    form: RegistrationForm,
    name: InputBuffer,
    age: InputBuffer,
    mobile: InputBuffer,
    document_path: InputBuffer,
    focus: RegistrationField,
    document_error: Option<String>,
}

impl RegistrationView {
    pub fn new() -> Self {
        Self {
            form: RegistrationForm::new(),
            name: InputBuffer::new().with_max_chars(80),
            age: InputBuffer::new().with_filter(digits_only).with_max_chars(3),
            mobile: InputBuffer::new().with_filter(phone_chars).with_max_chars(20),
            document_path: InputBuffer::new(),
            focus: RegistrationField::FullName,
            document_error: None,
        }
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn focus(&self) -> RegistrationField {
        self.focus
    }

    pub fn captures_text(&self) -> bool {
        self.focus != RegistrationField::Submit
    }

    fn active_buffer(&mut self) -> Option<&mut InputBuffer> {
        match self.focus {
            RegistrationField::FullName => Some(&mut self.name),
            RegistrationField::Age => Some(&mut self.age),
            RegistrationField::Mobile => Some(&mut self.mobile),
            RegistrationField::Document => Some(&mut self.document_path),
            RegistrationField::Submit => None,
        }
    }

    fn sync_form(&mut self) {
        self.form.full_name = self.name.text().to_string();
        self.form.age = self.age.text().to_string();
        self.form.mobile = self.mobile.text().to_string();
    }

    /// Attach the document at the typed path.
    fn attach_document(&mut self) {
        let path = self.document_path.text().trim().to_string();
        match DocumentHandle::from_path(&path) {
            Ok(document) => {
                log::info!("Identity document attached: {}", document.name());
                self.form.attach_document(document);
                self.document_path.clear();
                self.document_error = None;
            }
            Err(e) => {
                log::warn!("Could not attach document '{path}': {e}");
                self.document_error = Some(e.to_string());
            }
        }
    }

    pub fn handle_input(&mut self, event: &Event) -> StepOutcome {
        if let Event::Paste(text) = event {
            if let Some(buffer) = self.active_buffer() {
                buffer.insert_str(text);
                self.sync_form();
                return StepOutcome::Consumed;
            }
            return StepOutcome::Ignored;
        }

        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return StepOutcome::Consumed;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                return StepOutcome::Consumed;
            }
            KeyCode::Enter => return self.on_enter(),
            _ => {}
        }

        // Ctrl+X drops the attached document
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('x') && self.form.document.is_some() {
                self.form.remove_document();
                log::info!("Identity document removed");
                return StepOutcome::Consumed;
            }
            return StepOutcome::Ignored;
        }

        let Some(buffer) = self.active_buffer() else {
            return StepOutcome::Ignored;
        };
        match key.code {
            KeyCode::Char(c) => {
                buffer.insert_char(c);
            }
            KeyCode::Backspace => buffer.backspace(),
            KeyCode::Delete => buffer.delete(),
            KeyCode::Left => buffer.move_left(),
            KeyCode::Right => buffer.move_right(),
            KeyCode::Home => buffer.move_home(),
            KeyCode::End => buffer.move_end(),
            _ => return StepOutcome::Ignored,
        }
        self.sync_form();
        StepOutcome::Consumed
    }

    fn on_enter(&mut self) -> StepOutcome {
        match self.focus {
            RegistrationField::Document if !self.document_path.is_empty() => {
                self.attach_document();
                StepOutcome::Consumed
            }
            RegistrationField::Submit => {
                if self.form.is_valid() {
                    log::info!("Registration submitted");
                    StepOutcome::Advance
                } else {
                    StepOutcome::Consumed
                }
            }
            _ => {
                self.focus = self.focus.next();
                StepOutcome::Consumed
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Voter Registration");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Age
            Constraint::Length(1), // Age warning
            Constraint::Length(3), // Mobile
            Constraint::Length(3), // Document path
            Constraint::Length(1), // Attached document / picker error
            Constraint::Length(1), // Gate hint
            Constraint::Length(1), // Submit
            Constraint::Min(0),
        ])
        .split(inner);

        self.render_field(frame, chunks[0], RegistrationField::FullName, &self.name);
        self.render_field(frame, chunks[1], RegistrationField::Age, &self.age);
        if self.form.shows_age_warning() {
            frame.render_widget(
                Paragraph::new(Span::styled("  You must be 18 or above to vote", theme::warning())),
                chunks[2],
            );
        }
        self.render_field(frame, chunks[3], RegistrationField::Mobile, &self.mobile);
        self.render_field(frame, chunks[4], RegistrationField::Document, &self.document_path);

        let document_line = match (&self.document_error, &self.form.document) {
            (Some(err), _) => Line::from(Span::styled(format!("  {err}"), theme::warning())),
            (None, Some(doc)) => Line::from(vec![
                Span::styled("  ✓ ", theme::success()),
                Span::raw(doc.display_label()),
                Span::styled("  (Ctrl+X to remove)", theme::dim()),
            ]),
            (None, None) => Line::from(Span::styled(
                format!("  Accepted: {}", ACCEPTED_EXTENSIONS.join(", ")),
                theme::dim(),
            )),
        };
        frame.render_widget(Paragraph::new(document_line), chunks[5]);

        let reason = self.form.validate().err().map(|e| e.to_string());
        frame.render_widget(Paragraph::new(hint_line(reason)), chunks[6]);

        frame.render_widget(
            Paragraph::new(button_line(
                "Proceed to OTP Verification",
                self.form.is_valid(),
                self.focus == RegistrationField::Submit,
            )),
            chunks[7],
        );
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: RegistrationField, buffer: &InputBuffer) {
        let focused = self.focus == field;
        let input = Paragraph::new(buffer.text()).block(theme::block(field.label(), focused));
        frame.render_widget(input, area);

        if focused && area.width > 2 && area.height > 2 {
            let x = area.x + 1 + (buffer.cursor_column() as u16).min(area.width - 3);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl Default for RegistrationView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(view: &mut RegistrationView, text: &str) {
        for c in text.chars() {
            view.handle_input(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_fields_cycle() {
        let mut view = RegistrationView::new();
        for _ in 0..RegistrationField::ALL.len() {
            view.handle_input(&key(KeyCode::Tab));
        }
        assert_eq!(view.focus(), RegistrationField::FullName);
        view.handle_input(&key(KeyCode::BackTab));
        assert_eq!(view.focus(), RegistrationField::Submit);
        assert!(!view.captures_text());
    }

    #[test]
    fn test_age_accepts_digits_only() {
        let mut view = RegistrationView::new();
        view.handle_input(&key(KeyCode::Tab));
        type_str(&mut view, "1a7");
        assert_eq!(view.form().age, "17");
        assert!(view.form().shows_age_warning());
    }

    #[test]
    fn test_full_registration_advances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aadhaar.pdf");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let mut view = RegistrationView::new();
        type_str(&mut view, "Asha Rao");
        view.handle_input(&key(KeyCode::Enter));
        type_str(&mut view, "30");
        view.handle_input(&key(KeyCode::Enter));
        type_str(&mut view, "+91 98765-43210");
        view.handle_input(&key(KeyCode::Enter));
        assert_eq!(view.focus(), RegistrationField::Document);

        // Submitting before the document is attached stays put
        assert!(!view.form().is_valid());

        view.handle_input(&Event::Paste(path.display().to_string()));
        assert_eq!(view.handle_input(&key(KeyCode::Enter)), StepOutcome::Consumed);
        assert!(view.form().document.is_some());

        view.handle_input(&key(KeyCode::Enter));
        assert_eq!(view.focus(), RegistrationField::Submit);
        assert_eq!(view.handle_input(&key(KeyCode::Enter)), StepOutcome::Advance);
    }

    #[test]
    fn test_submit_with_closed_gate_is_consumed() {
        let mut view = RegistrationView::new();
        view.handle_input(&key(KeyCode::BackTab));
        assert_eq!(view.handle_input(&key(KeyCode::Enter)), StepOutcome::Consumed);
    }

    #[test]
    fn test_bad_document_shows_error() {
        let mut view = RegistrationView::new();
        for _ in 0..3 {
            view.handle_input(&key(KeyCode::Tab));
        }
        type_str(&mut view, "notes.txt");
        view.handle_input(&key(KeyCode::Enter));
        assert!(view.document_error.is_some());
        assert!(view.form().document.is_none());
    }

    #[test]
    fn test_ctrl_x_removes_document() {
        let mut view = RegistrationView::new();
        view.form.attach_document(DocumentHandle::new("id.png", vec![1, 2, 3]));
        let ctrl_x = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
        assert_eq!(view.handle_input(&ctrl_x), StepOutcome::Consumed);
        assert!(view.form().document.is_none());
    }
}

use std::sync::Arc;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::media::MediaDevice;
use crate::core::steps::face::{CaptureAngle, CAPTURE_COUNT};
use crate::core::steps::FaceCapture;
use crate::tui::services::Services;

use super::super::theme;
use super::{button_line, hint_line, key_press, StepOutcome};

/// Face capture over the configured camera. The camera session lives inside
/// `FaceCapture`, so dropping this view releases it.
pub struct FaceView {
    capture: FaceCapture,
    device: Arc<dyn MediaDevice>,
    camera_error: Option<String>,
}

impl FaceView {
    pub fn new(services: &Services) -> Self {
        Self {
            capture: FaceCapture::new(),
            device: Arc::clone(&services.camera),
            camera_error: None,
        }
    }

    pub fn capture_state(&self) -> &FaceCapture {
        &self.capture
    }

    fn start_camera(&mut self) {
        match self.capture.start_camera(self.device.as_ref()) {
            Ok(()) => self.camera_error = None,
            Err(e) => {
                self.camera_error = Some(format!(
                    "Unable to access camera: {e}. Please check permissions."
                ))
            }
        }
    }

    fn take_capture(&mut self) {
        match self.capture.capture() {
            Ok(angle) => {
                self.camera_error = None;
                log::debug!("Face capture stored for {}", angle.label());
            }
            Err(e) => {
                log::warn!("Face capture failed: {e}");
                self.camera_error = Some(e.to_string());
            }
        }
    }

    pub fn handle_input(&mut self, event: &Event) -> StepOutcome {
        let Some(key) = key_press(event) else {
            return StepOutcome::Ignored;
        };
        match key.code {
            KeyCode::Char('s') => {
                if self.capture.is_camera_active() {
                    self.capture.stop_camera();
                } else {
                    self.start_camera();
                }
                StepOutcome::Consumed
            }
            KeyCode::Char(' ') => {
                self.take_capture();
                StepOutcome::Consumed
            }
            KeyCode::Char('b') | KeyCode::Backspace => {
                self.capture.back();
                StepOutcome::Consumed
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.capture.select_angle(index);
                StepOutcome::Consumed
            }
            KeyCode::Enter => {
                if self.capture.all_captured() {
                    match self.capture.finish() {
                        Ok(()) => {
                            log::info!("Face verification complete");
                            StepOutcome::Advance
                        }
                        Err(_) => StepOutcome::Consumed,
                    }
                } else if self.capture.is_camera_active() {
                    self.take_capture();
                    StepOutcome::Consumed
                } else {
                    self.start_camera();
                    StepOutcome::Consumed
                }
            }
            _ => StepOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Face Verification");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3),                    // Camera status + instruction
            Constraint::Length(CAPTURE_COUNT as u16), // Angle slots
            Constraint::Length(2),                    // Device error
            Constraint::Length(1),                    // Gate hint
            Constraint::Length(1),                    // Continue
            Constraint::Min(0),
        ])
        .split(inner);

        let status = if self.capture.is_camera_active() {
            Line::from(vec![
                Span::styled("● Camera on  ", theme::success()),
                Span::styled(self.capture.current_angle().instruction(), theme::heading()),
            ])
        } else {
            Line::from(vec![
                Span::styled("○ Camera off  ", theme::muted()),
                Span::raw("Press "),
                Span::styled("s", theme::highlight()),
                Span::raw(" to start the camera"),
            ])
        };
        frame.render_widget(
            Paragraph::new(vec![
                status,
                Line::from(Span::styled(
                    format!("{} of {} angles captured", self.capture.captured_count(), CAPTURE_COUNT),
                    theme::muted(),
                )),
            ]),
            chunks[0],
        );

        let slots: Vec<Line> = CaptureAngle::ALL
            .iter()
            .enumerate()
            .map(|(i, angle)| {
                let current = i == self.capture.current_index();
                let marker = if current { "▸" } else { " " };
                let (mark, detail) = match &self.capture.captures()[i] {
                    Some(shot) => (
                        Span::styled("✓", theme::success()),
                        format!("{}x{} ({} bytes)", shot.width, shot.height, shot.data.len()),
                    ),
                    None => (Span::styled("·", theme::dim()), String::new()),
                };
                let style = if current { theme::highlight() } else { theme::muted() };
                Line::from(vec![
                    Span::styled(format!("{marker} {}. ", i + 1), style),
                    mark,
                    Span::styled(format!(" {:<8}", angle.label()), style),
                    Span::styled(detail, theme::dim()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(slots), chunks[1]);

        if let Some(err) = &self.camera_error {
            frame.render_widget(
                Paragraph::new(Span::styled(err.as_str(), theme::warning())).wrap(Wrap { trim: true }),
                chunks[2],
            );
        }

        let reason = self.capture.validate().err().map(|e| e.to_string());
        frame.render_widget(Paragraph::new(hint_line(reason)), chunks[3]);
        frame.render_widget(
            Paragraph::new(button_line("Continue", self.capture.is_valid(), self.capture.all_captured())),
            chunks[4],
        );
    }
}

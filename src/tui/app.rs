use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::wizard::WizardController;

use super::events::{AppEvent, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::services::Services;
use super::stepper;
use super::theme;
use super::views::{render_aside, StepOutcome, StepView};

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Wizard position and completion hook.
    pub controller: WizardController,
    /// View of the active step. Replaced on every advance.
    pub view: StepView,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    /// Must be called from within a tokio runtime: step views may start
    /// timers as soon as they are built.
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        let hook_tx = services.event_tx.clone();
        let controller = WizardController::new(move || {
            let _ = hook_tx.send(AppEvent::WizardCompleted);
        });
        let view = StepView::for_step(controller.current_step(), &services);

        Self {
            running: true,
            controller,
            view,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(&crossterm_event),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Timer(tick) => {
                let outcome = self.view.on_timer(&tick);
                if outcome == StepOutcome::Ignored {
                    log::trace!("Dropping stale {:?} tick", tick.kind);
                }
                self.apply_outcome(outcome);
            }
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::WizardCompleted => self.on_completed(),
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn handle_input(&mut self, event: &Event) {
        // Priority 1: Ctrl+C always quits
        if let Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            if modifiers.contains(KeyModifiers::CONTROL) {
                self.running = false;
                return;
            }
        }

        // Priority 2: Help modal
        if self.show_help {
            if let Event::Key(KeyEvent {
                code: KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1),
                kind: KeyEventKind::Press,
                ..
            }) = event
            {
                self.show_help = false;
            }
            return;
        }

        // Priority 3: Active step
        let outcome = self.view.handle_input(event, &self.services);
        if outcome != StepOutcome::Ignored {
            self.apply_outcome(outcome);
            return;
        }

        // Priority 4: Global keybindings
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };
        match code {
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('?') if !self.view.captures_text() => self.show_help = true,
            KeyCode::Char('q') if !self.view.captures_text() => self.running = false,
            _ => {}
        }
    }

    fn apply_outcome(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Consumed | StepOutcome::Ignored => {}
            StepOutcome::Advance => self.advance(),
            StepOutcome::Complete => {
                self.controller.complete();
            }
        }
    }

    /// Move to the next step. The previous view is dropped here, which
    /// releases any timers or camera it held.
    fn advance(&mut self) {
        let before = self.controller.step_index();
        let step = self.controller.advance();
        if self.controller.step_index() != before {
            self.view = StepView::for_step(step, &self.services);
        }
    }

    fn on_completed(&mut self) {
        self.push_notification(
            "Voting process completed".to_string(),
            NotificationLevel::Success,
        );
        if self.services.config.tui.exit_on_complete {
            self.running = false;
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        let mut notification = Notification::new(message, level);
        notification.id = self.notification_counter;
        self.notifications.push(notification);

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);
        let definition = self.controller.current_view();

        let header = Paragraph::new(vec![
            Line::from(Span::styled(definition.title, theme::title())),
            Line::from(Span::styled(definition.subtitle, theme::muted())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, layout.header);

        stepper::render(
            frame,
            layout.stepper,
            self.controller.current_step(),
            self.controller.progress_ratio(),
        );

        self.view.render(frame, layout.form);
        if let Some(aside) = layout.aside {
            render_aside(frame, aside, definition);
        }

        self.render_status_bar(frame, layout.status);
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let step = self.controller.current_step();
        let mut spans = vec![
            Span::styled(" eVote ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                step.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
        ];
        for (key, what) in self.view.hints() {
            spans.push(Span::styled(*key, theme::key_hint()));
            spans.push(Span::raw(format!(":{what} ")));
        }
        spans.push(Span::raw("│ "));
        spans.push(Span::styled("F1", theme::key_hint()));
        spans.push(Span::raw(":help "));
        spans.push(Span::styled("Ctrl+C", theme::key_hint()));
        spans.push(Span::raw(":quit"));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1.min(area.height.saturating_sub(height));

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("Ctrl+C", "Quit"),
            ("q", "Quit (outside text fields)"),
            ("F1 / ?", "Toggle this help"),
            ("", ""),
            ("Registration:", ""),
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Enter", "Next field, attach document, submit"),
            ("Ctrl+X", "Remove attached document"),
            ("", ""),
            ("OTP:", ""),
            ("0-9 / paste", "Fill digit slots"),
            ("←/→, Backspace", "Move between slots"),
            ("r", "Resend when the countdown ends"),
            ("", ""),
            ("Voting:", ""),
            ("j/k, Space", "Move, select party"),
            ("c", "Cast vote"),
            ("", ""),
            ("Face ID:", ""),
            ("s", "Start / stop camera"),
            ("Space", "Capture current angle"),
            ("1-4 / b", "Pick angle to retake / previous angle"),
            ("", ""),
            ("Fingerprint:", ""),
            ("Enter", "Start scan, then finalize vote"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

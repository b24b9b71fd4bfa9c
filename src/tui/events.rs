use crate::core::timer::TimerTick;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse/paste).
    Input(crossterm::event::Event),
    /// A step-owned timer fired.
    Timer(TimerTick),
    /// Notification to display to the user.
    Notification(Notification),
    /// The completion hook fired: the vote has been cast.
    WizardCompleted,
    /// Request to quit the application.
    Quit,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// Default lifetime in ticks.
    pub const DEFAULT_TTL: u32 = 100;

    /// A notification whose id is assigned by `AppState` on arrival.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: Self::DEFAULT_TTL,
        }
    }
}

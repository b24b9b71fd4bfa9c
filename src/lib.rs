/// eVote - guided voter onboarding and ballot casting (TUI Edition)
///
/// Core library providing the seven-step voting wizard, its per-step
/// validation gates, scoped timers and camera sessions, plus the ratatui
/// front end that drives them.

pub mod config;
pub mod core;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

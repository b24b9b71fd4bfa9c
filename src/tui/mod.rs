//! Terminal front end: event loop, step views and shared chrome.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod stepper;
pub mod theme;
pub mod views;
pub mod widgets;

pub mod document;
pub mod logging;
pub mod media;
pub mod timer;

// Flow control and per-step gates
pub mod steps;
pub mod wizard;

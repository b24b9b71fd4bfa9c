//! Wizard controller: the single piece of wizard-level state.
//!
//! Holds the current step index and performs clamped, forward-only
//! advancement. Steps gate themselves; the controller trusts them and does no
//! cross-step validation.

use super::types::{StepDefinition, WizardStep, LAST_STEP_INDEX, STEP_TABLE};

/// Receiver for the terminal "voting finished" signal.
///
/// Implemented by whatever hosts the wizard (the TUI app, a test double).
pub trait CompletionHook {
    fn on_complete(&mut self);
}

impl<F: FnMut()> CompletionHook for F {
    fn on_complete(&mut self) {
        self()
    }
}

/// Linear step controller.
pub struct WizardController {
    step_index: usize,
    completed: bool,
    hook: Box<dyn CompletionHook + Send>,
}

impl WizardController {
    pub fn new(hook: impl CompletionHook + Send + 'static) -> Self {
        Self {
            step_index: 0,
            completed: false,
            hook: Box::new(hook),
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_view().step
    }

    /// Move one step forward, saturating at the terminal step.
    pub fn advance(&mut self) -> WizardStep {
        let from = self.step_index;
        self.step_index = (self.step_index + 1).min(LAST_STEP_INDEX);
        if from != self.step_index {
            log::info!(
                "Wizard advanced: {} -> {}",
                STEP_TABLE[from].step,
                self.current_step()
            );
        } else {
            log::debug!("Wizard advance ignored at terminal step");
        }
        self.current_step()
    }

    /// Definition of the active step.
    pub fn current_view(&self) -> &'static StepDefinition {
        Self::view_for(self.step_index)
    }

    /// Look up a step definition; out-of-range indices fall back to step 0.
    pub fn view_for(index: usize) -> &'static StepDefinition {
        match STEP_TABLE.get(index) {
            Some(def) => def,
            None => {
                log::warn!("Step index {index} out of range, falling back to the first step");
                &STEP_TABLE[0]
            }
        }
    }

    /// Signal that the terminal step finished.
    ///
    /// Invokes the completion hook at most once, and only from the terminal
    /// step. Returns whether the hook fired.
    pub fn complete(&mut self) -> bool {
        if self.step_index != LAST_STEP_INDEX {
            log::warn!(
                "Completion requested from {} before the terminal step, ignoring",
                self.current_step()
            );
            return false;
        }
        if self.completed {
            log::debug!("Completion already signalled, ignoring");
            return false;
        }
        self.completed = true;
        log::info!("Voting process completed");
        self.hook.on_complete();
        true
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Fraction of the progress bar to fill, `0.0..=1.0`.
    pub fn progress_ratio(&self) -> f64 {
        self.step_index as f64 / LAST_STEP_INDEX as f64
    }
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("step_index", &self.step_index)
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

//! The session state machine.
//!
//! A `Controller` is owned by the event loop and only ever touched from the
//! UI task. The fetch worker talks to it exclusively through the outcome
//! channel drained by the loop.
mod events;
mod lifecycle;
mod render;

use crate::catalog::Catalog;
use crate::fetch::FetchRunner;
use crate::ui::terminal::{CursorShape, TerminalSink};
use crate::ui::{LoopExit, SessionState};
use tracing::{debug, error};

/// Presentation settings resolved from the configuration.
#[derive(Debug, Clone)]
pub struct UiOptions {
    pub window_title: String,
    pub cursor_shape: CursorShape,
    /// Theme names hidden from the list.
    pub exclude: Vec<String>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            window_title: "Choose a theme".to_string(),
            cursor_shape: CursorShape::Bar,
            exclude: Vec::new(),
        }
    }
}

pub struct Controller<S: TerminalSink> {
    pub(super) sink: S,
    pub(super) options: UiOptions,
    pub(super) runner: FetchRunner,
    pub(super) state: SessionState,
    pub(super) pending_diagnostic: Option<String>,
    pub(super) screen_size: (u16, u16),
    pub(super) catalog: Option<Catalog>,
    pub(super) outcome_received: bool,
    pub(super) selected: usize,
    /// First visible row of the theme list.
    pub(super) scroll: usize,
    pub(super) chosen: Option<String>,
    pub(super) exit_code: Option<i32>,
    pub(super) initialized: bool,
    pub(super) finalized: bool,
}

impl<S: TerminalSink> Controller<S> {
    pub fn new(sink: S, runner: FetchRunner, options: UiOptions) -> Self {
        Self {
            sink,
            options,
            runner,
            state: SessionState::Fetching,
            pending_diagnostic: None,
            screen_size: (80, 24),
            catalog: None,
            outcome_received: false,
            selected: 0,
            scroll: 0,
            chosen: None,
            exit_code: None,
            initialized: false,
            finalized: false,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn screen_size(&self) -> (u16, u16) {
        self.screen_size
    }

    #[cfg(test)]
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    #[cfg(test)]
    pub fn pending_diagnostic(&self) -> Option<&str> {
        self.pending_diagnostic.as_deref()
    }

    /// The exit code requested so far, if any. The loop stops once this is set.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.runner.is_started() && !self.outcome_received
    }

    /// Asks the loop to stop. The first request wins.
    pub fn quit_loop(&mut self, code: i32) {
        match self.exit_code {
            None => {
                debug!("Quit requested with status {}", code);
                self.exit_code = Some(code);
            }
            Some(existing) => {
                debug!("Ignoring quit({}), already quitting with {}", code, existing);
            }
        }
    }

    pub fn exit_status(&self) -> LoopExit {
        LoopExit {
            code: self.exit_code.unwrap_or(0),
            diagnostic: self.pending_diagnostic.clone(),
            fetch_in_flight: self.fetch_in_flight(),
            selected: self.chosen.clone(),
        }
    }

    /// Redraws and logs any terminal error.
    pub(super) fn refresh(&mut self) {
        if let Err(e) = self.redraw() {
            error!("Failed to draw screen: {}", e);
        }
    }
}

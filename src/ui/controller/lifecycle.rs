use std::io;
use tracing::{debug, error, warn};

use crate::ui::terminal::TerminalSink;

use super::Controller;

impl<S: TerminalSink> Controller<S> {
    /// Puts the terminal in the picker's presentation mode, draws the first
    /// screen and starts the download. Only the first call does anything.
    pub fn initialize(&mut self) {
        if self.initialized {
            warn!("Controller already initialized");
            return;
        }
        self.initialized = true;

        if let Err(e) = self.init_terminal_state() {
            error!("Failed to set up terminal: {}", e);
        }
        self.refresh();
        self.runner.start();
    }

    fn init_terminal_state(&mut self) -> io::Result<()> {
        self.sink.set_line_wrapping(false)?;
        self.sink.set_window_title(&self.options.window_title)?;
        self.sink.set_cursor_shape(self.options.cursor_shape)
    }

    /// Restores default colors and cursor visibility. Runs at most once; the
    /// `Drop` impl covers exits that skip the explicit call.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.finalized = true;
        debug!("Restoring terminal defaults");

        let restored = self
            .sink
            .set_default_colors()
            .and_then(|_| self.sink.set_cursor_visible(true))
            .and_then(|_| self.sink.flush());
        if let Err(e) = restored {
            error!("Failed to restore terminal: {}", e);
        }
    }
}

impl<S: TerminalSink> Drop for Controller<S> {
    fn drop(&mut self) {
        if self.initialized {
            self.finalize();
        }
    }
}

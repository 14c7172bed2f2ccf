pub mod args;
mod exit;
mod setup;

pub use args::AppArgs;
pub use exit::finish;
pub use setup::{prepare, PreparedApp};

use crate::fetch::{install_panic_hook, outcome_channel, FetchRunner};
use crate::ui::input::terminal_events;
use crate::ui::terminal::{CrosstermSink, TerminalSession};
use crate::ui::{Controller, EventLoop, LoopExit};
use anyhow::Result;
use tracing::warn;

/// Takes over the terminal, runs the picker until it quits and hands the
/// terminal back.
///
/// # Errors
///
/// Returns an error only if the terminal cannot be put into raw mode; the
/// download has not started at that point.
pub async fn run(prepared: PreparedApp) -> Result<LoopExit> {
    let PreparedApp { options, source } = prepared;

    install_panic_hook();
    let mut session = TerminalSession::enter()?;

    let (outcome_tx, outcome_rx) = outcome_channel();
    let runner = FetchRunner::new(source, outcome_tx).with_delay(options.fetch_delay);
    let mut controller = Controller::new(CrosstermSink::stdout(), runner, options.ui_options());

    match session.size() {
        Ok((width, height)) => controller.handle_resize(width, height),
        Err(e) => warn!("Could not read terminal size: {}", e),
    }

    let mut event_loop = EventLoop::new(terminal_events(), outcome_rx);
    let exit = event_loop.run(&mut controller).await;
    drop(controller);

    if let Err(e) = session.restore() {
        warn!("Failed to restore terminal: {}", e);
    }
    Ok(exit)
}

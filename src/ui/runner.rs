use futures::{Stream, StreamExt};
use tracing::debug;

use crate::fetch::OutcomeReceiver;
use crate::ui::terminal::TerminalSink;
use crate::ui::{Controller, InputEvent, LoopExit};

/// The single-task UI loop: waits on input and on the fetch outcome channel
/// and feeds whichever arrives first to the controller.
pub struct EventLoop<I> {
    input: I,
    outcomes: OutcomeReceiver,
    outcomes_open: bool,
}

impl<I> EventLoop<I>
where
    I: Stream<Item = InputEvent> + Unpin,
{
    pub fn new(input: I, outcomes: OutcomeReceiver) -> Self {
        Self {
            input,
            outcomes,
            outcomes_open: true,
        }
    }

    /// Runs until the controller asks to quit. `finalize` has run by the time
    /// this returns.
    pub async fn run<S: TerminalSink>(&mut self, controller: &mut Controller<S>) -> LoopExit {
        controller.initialize();
        debug!("Starting theme picker loop");

        while controller.exit_code().is_none() {
            tokio::select! {
                event = self.input.next() => match event {
                    Some(event) => dispatch(controller, event),
                    None => {
                        debug!("Input stream closed");
                        controller.handle_end_of_input();
                    }
                },
                outcome = self.outcomes.recv(), if self.outcomes_open => match outcome {
                    Some(outcome) => controller.handle_fetch_outcome(outcome),
                    None => self.outcomes_open = false,
                },
            }
        }

        controller.finalize();
        let exit = controller.exit_status();
        debug!(
            "Loop finished with status {} (fetch in flight: {})",
            exit.code, exit.fetch_in_flight
        );
        exit
    }
}

fn dispatch<S: TerminalSink>(controller: &mut Controller<S>, event: InputEvent) {
    match event {
        InputEvent::Key { key, in_paste } => controller.handle_key_event(key, in_paste),
        InputEvent::Resize(width, height) => controller.handle_resize(width, height),
        InputEvent::Interrupt => controller.handle_interrupt(),
        InputEvent::EndOfInput => controller.handle_end_of_input(),
    }
}

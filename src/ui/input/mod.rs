//! Turns raw crossterm events into the notifications the controller handles.
mod keys;

pub use keys::key_matches;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{stream, Stream, StreamExt};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: KeyEvent, in_paste: bool },
    Resize(u16, u16),
    Interrupt,
    EndOfInput,
}

impl InputEvent {
    pub fn key(key: KeyEvent) -> Self {
        Self::Key {
            key,
            in_paste: false,
        }
    }
}

/// Live input from the controlling terminal.
///
/// Ends with a single `EndOfInput` if crossterm reports a read error.
pub fn terminal_events() -> impl Stream<Item = InputEvent> + Unpin {
    EventStream::new()
        .map(|result| match result {
            Ok(event) => translate(event),
            Err(e) => {
                warn!("Failed to read terminal input: {}", e);
                vec![InputEvent::EndOfInput]
            }
        })
        .flat_map(stream::iter)
}

pub(super) fn translate(event: Event) -> Vec<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if key.modifiers == KeyModifiers::CONTROL {
                match key.code {
                    KeyCode::Char('c') => return vec![InputEvent::Interrupt],
                    KeyCode::Char('d') => return vec![InputEvent::EndOfInput],
                    _ => {}
                }
            }
            vec![InputEvent::key(key)]
        }
        Event::Paste(text) => text
            .chars()
            .map(|c| InputEvent::Key {
                key: KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                in_paste: true,
            })
            .collect(),
        Event::Resize(width, height) => vec![InputEvent::Resize(width, height)],
        other => {
            debug!("Ignoring terminal event {:?}", other);
            Vec::new()
        }
    }
}

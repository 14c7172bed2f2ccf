//! Test doubles shared by the unit tests.
use crate::catalog::{Catalog, CatalogSource, FetchError, Theme};
use crate::ui::terminal::{CursorShape, TerminalSink};
use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

pub fn sample_catalog(count: usize) -> Catalog {
    Catalog::new(
        (0..count)
            .map(|i| Theme {
                name: format!("Theme {}", i),
                author: None,
                blurb: None,
                is_dark: i % 2 == 1,
                settings: BTreeMap::new(),
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCommand {
    ClearScreen,
    CursorVisible(bool),
    CursorShape(CursorShape),
    LineWrapping(bool),
    WindowTitle(String),
    DefaultColors,
    MoveTo(u16, u16),
    Print(String),
    Highlighted(String),
    Flush,
}

/// Records every directive; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<SinkCommand>>>,
}

impl RecordingSink {
    pub fn commands(&self) -> Vec<SinkCommand> {
        self.log.lock().unwrap().clone()
    }

    pub fn contains(&self, command: &SinkCommand) -> bool {
        self.log.lock().unwrap().contains(command)
    }

    pub fn count(&self, command: &SinkCommand) -> usize {
        self.log.lock().unwrap().iter().filter(|c| *c == command).count()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }

    fn push(&mut self, command: SinkCommand) -> io::Result<()> {
        self.log.lock().unwrap().push(command);
        Ok(())
    }
}

impl TerminalSink for RecordingSink {
    fn clear_screen(&mut self) -> io::Result<()> {
        self.push(SinkCommand::ClearScreen)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.push(SinkCommand::CursorVisible(visible))
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) -> io::Result<()> {
        self.push(SinkCommand::CursorShape(shape))
    }

    fn set_line_wrapping(&mut self, enabled: bool) -> io::Result<()> {
        self.push(SinkCommand::LineWrapping(enabled))
    }

    fn set_window_title(&mut self, title: &str) -> io::Result<()> {
        self.push(SinkCommand::WindowTitle(title.to_string()))
    }

    fn set_default_colors(&mut self) -> io::Result<()> {
        self.push(SinkCommand::DefaultColors)
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.push(SinkCommand::MoveTo(column, row))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.push(SinkCommand::Print(text.to_string()))
    }

    fn print_highlighted(&mut self, text: &str) -> io::Result<()> {
        self.push(SinkCommand::Highlighted(text.to_string()))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.push(SinkCommand::Flush)
    }
}

enum Behaviour {
    Ready(Catalog),
    Fail(String),
    Panic(String),
    /// Blocks until the matching `Gate` is opened or dropped.
    Gated(Catalog, Mutex<mpsc::Receiver<()>>),
}

/// A catalog source with scripted behaviour that counts its calls.
pub struct StubSource {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

/// Releases a gated `StubSource` when opened or dropped.
pub struct Gate(mpsc::Sender<()>);

impl Gate {
    pub fn open(self) {
        let _ = self.0.send(());
    }
}

impl StubSource {
    pub fn ready(catalog: Catalog) -> Self {
        Self::with(Behaviour::Ready(catalog))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Behaviour::Fail(message.to_string()))
    }

    pub fn panicking(message: &str) -> Self {
        Self::with(Behaviour::Panic(message.to_string()))
    }

    pub fn gated(catalog: Catalog) -> (Self, Gate) {
        let (tx, rx) = mpsc::channel();
        (
            Self::with(Behaviour::Gated(catalog, Mutex::new(rx))),
            Gate(tx),
        )
    }

    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogSource for StubSource {
    fn fetch(&self) -> Result<Catalog, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Ready(catalog) => Ok(catalog.clone()),
            Behaviour::Fail(message) => Err(FetchError::Other(message.clone())),
            Behaviour::Panic(message) => panic!("{}", message),
            Behaviour::Gated(catalog, gate) => {
                // Bounded so a forgotten gate cannot wedge the test runtime.
                let _ = gate.lock().unwrap().recv_timeout(Duration::from_secs(30));
                Ok(catalog.clone())
            }
        }
    }

    fn describe(&self) -> String {
        "stub".to_string()
    }
}

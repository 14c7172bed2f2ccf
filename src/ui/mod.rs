pub mod controller;
pub mod input;
pub mod runner;
pub mod terminal;

pub use controller::{Controller, UiOptions};
pub use input::InputEvent;
pub use runner::EventLoop;

/// Which screen the session is on. Starts at `Fetching` and only ever moves
/// to `Browsing`, once, when the catalog arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Fetching,
    Browsing,
}

/// What the event loop hands back to the process entry once it stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopExit {
    pub code: i32,
    /// Set only when the download failed.
    pub diagnostic: Option<String>,
    /// The worker has not posted its outcome yet.
    pub fetch_in_flight: bool,
    /// Name of the theme picked with Enter while browsing.
    pub selected: Option<String>,
}

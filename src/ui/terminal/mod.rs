//! Display directives issued by the controller, and the crossterm backend
//! that carries them out.
mod lifecycle;
mod sink;

pub use lifecycle::TerminalSession;
pub use sink::CrosstermSink;

use std::io;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Block,
    Bar,
    Underline,
}

impl FromStr for CursorShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "bar" | "beam" => Ok(Self::Bar),
            "underline" => Ok(Self::Underline),
            other => Err(format!("unknown cursor shape '{}'", other)),
        }
    }
}

/// Everything the controller is allowed to do to the screen.
///
/// Commands may be buffered until `flush`.
pub trait TerminalSink {
    fn clear_screen(&mut self) -> io::Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn set_cursor_shape(&mut self, shape: CursorShape) -> io::Result<()>;
    fn set_line_wrapping(&mut self, enabled: bool) -> io::Result<()>;
    fn set_window_title(&mut self, title: &str) -> io::Result<()>;
    fn set_default_colors(&mut self) -> io::Result<()>;
    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()>;
    fn print(&mut self, text: &str) -> io::Result<()>;
    /// Prints `text` in reverse video.
    fn print_highlighted(&mut self, text: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

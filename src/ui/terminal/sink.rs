use super::{CursorShape, TerminalSink};
use crossterm::{
    cursor, queue,
    style::{Attribute, Print, ResetColor, SetAttribute},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};

/// Queues crossterm commands on any writer, normally stdout.
pub struct CrosstermSink<W: Write> {
    out: W,
}

impl<W: Write> CrosstermSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl CrosstermSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink for CrosstermSink<W> {
    fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.out, cursor::Show)
        } else {
            queue!(self.out, cursor::Hide)
        }
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) -> io::Result<()> {
        let style = match shape {
            CursorShape::Block => cursor::SetCursorStyle::BlinkingBlock,
            CursorShape::Bar => cursor::SetCursorStyle::BlinkingBar,
            CursorShape::Underline => cursor::SetCursorStyle::BlinkingUnderScore,
        };
        queue!(self.out, style)
    }

    fn set_line_wrapping(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            queue!(self.out, terminal::EnableLineWrap)
        } else {
            queue!(self.out, terminal::DisableLineWrap)
        }
    }

    fn set_window_title(&mut self, title: &str) -> io::Result<()> {
        queue!(self.out, terminal::SetTitle(title))
    }

    fn set_default_colors(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(column, row))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn print_highlighted(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::NoReverse)
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queues_escape_sequences_until_flush() {
        let mut sink = CrosstermSink::new(Vec::new());
        sink.set_window_title("Choose a theme").unwrap();
        sink.set_line_wrapping(false).unwrap();
        sink.print("hello").unwrap();
        sink.flush().unwrap();

        let written = String::from_utf8(sink.out).unwrap();
        assert!(written.contains("Choose a theme"));
        assert!(written.contains("\x1b[?7l"));
        assert!(written.ends_with("hello"));
    }

    #[test]
    fn parses_cursor_shapes() {
        assert_eq!("bar".parse::<CursorShape>().unwrap(), CursorShape::Bar);
        assert_eq!("Beam".parse::<CursorShape>().unwrap(), CursorShape::Bar);
        assert_eq!("block".parse::<CursorShape>().unwrap(), CursorShape::Block);
        assert!("triangle".parse::<CursorShape>().is_err());
    }
}

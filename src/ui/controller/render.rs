use std::io;
use unicode_width::UnicodeWidthChar;

use crate::catalog::Theme;
use crate::ui::terminal::TerminalSink;
use crate::ui::SessionState;

use super::Controller;

const FETCHING_NOTICE: &str = "Downloading themes from repository, please wait...";
const BROWSING_HEADER: &str = "Choose a theme  (Up/Down to move, Enter to select, Esc to quit)";
const HEADER_ROWS: u16 = 2;

impl<S: TerminalSink> Controller<S> {
    pub fn redraw(&mut self) -> io::Result<()> {
        self.sink.clear_screen()?;
        self.enforce_cursor_state()?;
        match self.state {
            SessionState::Fetching => self.draw_fetching_screen()?,
            SessionState::Browsing => self.draw_browsing_screen()?,
        }
        self.sink.flush()
    }

    fn enforce_cursor_state(&mut self) -> io::Result<()> {
        self.sink
            .set_cursor_visible(self.state == SessionState::Fetching)
    }

    fn draw_fetching_screen(&mut self) -> io::Result<()> {
        self.sink.print(FETCHING_NOTICE)
    }

    fn draw_browsing_screen(&mut self) -> io::Result<()> {
        let width = self.screen_size.0 as usize;
        let rows = self.list_rows();
        let first = self.scroll_to_selection(rows);

        self.sink.print(&truncate(BROWSING_HEADER, width))?;

        let Some(catalog) = &self.catalog else {
            return Ok(());
        };
        let mut visible = catalog.visible(&self.options.exclude).peekable();
        if visible.peek().is_none() {
            self.sink.move_to(0, HEADER_ROWS)?;
            return self.sink.print("No themes available.");
        }

        for (offset, (index, theme)) in visible.enumerate().skip(first).take(rows).enumerate() {
            let line = truncate(&describe(theme), width);
            self.sink.move_to(0, HEADER_ROWS + offset as u16)?;
            if index == self.selected {
                self.sink.print_highlighted(&line)?;
            } else {
                self.sink.print(&line)?;
            }
        }
        Ok(())
    }

    /// Moves the scroll offset only as far as needed to keep the selection
    /// inside a window of `rows` entries.
    fn scroll_to_selection(&mut self, rows: usize) -> usize {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }
        self.scroll
    }

    pub(super) fn list_rows(&self) -> usize {
        self.screen_size.1.saturating_sub(HEADER_ROWS).max(1) as usize
    }

    pub(super) fn visible_count(&self) -> usize {
        self.catalog
            .as_ref()
            .map_or(0, |catalog| catalog.visible(&self.options.exclude).count())
    }
}

fn describe(theme: &Theme) -> String {
    let tone = if theme.is_dark { "dark" } else { "light" };
    match &theme.author {
        Some(author) => format!("{} [{}] by {}", theme.name, tone, author),
        None => format!("{} [{}]", theme.name, tone),
    }
}

/// Cuts `text` to at most `width` terminal columns.
fn truncate(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

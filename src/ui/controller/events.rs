use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use crate::fetch::FetchOutcome;
use crate::ui::input::key_matches;
use crate::ui::terminal::TerminalSink;
use crate::ui::SessionState;

use super::Controller;

impl<S: TerminalSink> Controller<S> {
    pub fn handle_key_event(&mut self, key: KeyEvent, in_paste: bool) {
        match self.state {
            SessionState::Fetching => self.on_fetching_key_event(key, in_paste),
            SessionState::Browsing => self.on_browsing_key_event(key, in_paste),
        }
    }

    fn on_fetching_key_event(&mut self, key: KeyEvent, _in_paste: bool) {
        if key_matches(&key, "esc") {
            info!("Download cancelled by user");
            self.quit_loop(0);
        }
    }

    fn on_browsing_key_event(&mut self, key: KeyEvent, in_paste: bool) {
        if in_paste {
            return;
        }

        let count = self.visible_count();
        let page = self.list_rows();
        let previous = self.selected;

        if key_matches(&key, "esc") || key_matches(&key, "q") {
            self.quit_loop(0);
            return;
        } else if key_matches(&key, "enter") {
            self.chosen = self.selected_theme_name();
            if let Some(name) = &self.chosen {
                info!("Selected theme {}", name);
            }
            self.quit_loop(0);
            return;
        } else if key_matches(&key, "up") || key_matches(&key, "k") {
            self.selected = self.selected.saturating_sub(1);
        } else if key_matches(&key, "down") || key_matches(&key, "j") {
            self.selected = (self.selected + 1).min(count.saturating_sub(1));
        } else if key_matches(&key, "page_up") {
            self.selected = self.selected.saturating_sub(page);
        } else if key_matches(&key, "page_down") {
            self.selected = (self.selected + page).min(count.saturating_sub(1));
        } else if key_matches(&key, "home") || key_matches(&key, "g") {
            self.selected = 0;
        } else if key_matches(&key, "end") || key_matches(&key, "G") {
            self.selected = count.saturating_sub(1);
        }

        if self.selected != previous {
            self.refresh();
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.screen_size = (width, height);
        if self.state == SessionState::Browsing {
            self.refresh();
        }
    }

    pub fn handle_interrupt(&mut self) {
        self.quit_loop(1);
    }

    pub fn handle_end_of_input(&mut self) {
        self.quit_loop(1);
    }

    /// Applies the result of the download. Only the first outcome counts.
    pub fn handle_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if self.outcome_received {
            warn!("Ignoring duplicate fetch outcome");
            return;
        }
        self.outcome_received = true;

        if self.state != SessionState::Fetching {
            warn!("Fetch outcome arrived in state {:?}, ignoring", self.state);
            return;
        }

        match outcome {
            FetchOutcome::Catalog(catalog) => {
                debug!("Switching to browsing with {} themes", catalog.len());
                self.catalog = Some(catalog);
                self.selected = 0;
                self.scroll = 0;
                self.state = SessionState::Browsing;
                self.refresh();
            }
            FetchOutcome::Failure(diagnostic) => {
                self.pending_diagnostic = Some(diagnostic);
                self.quit_loop(1);
            }
        }
    }

    fn selected_theme_name(&self) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        catalog
            .visible(&self.options.exclude)
            .nth(self.selected)
            .map(|theme| theme.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::fetch::{outcome_channel, FetchOutcome, FetchRunner, OutcomeReceiver};
    use crate::testing::{sample_catalog, RecordingSink, SinkCommand, StubSource};
    use crate::ui::{Controller, SessionState, UiOptions};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;

    fn controller() -> (Controller<RecordingSink>, RecordingSink, OutcomeReceiver) {
        let (tx, rx) = outcome_channel();
        let runner = FetchRunner::new(Arc::new(StubSource::ready(sample_catalog(3))), tx);
        let sink = RecordingSink::default();
        let controller = Controller::new(sink.clone(), runner, UiOptions::default());
        (controller, sink, rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn resize_while_fetching_only_updates_screen_size() {
        let (mut controller, sink, _rx) = controller();
        for (w, h) in [(100, 30), (20, 5), (300, 90)] {
            controller.handle_resize(w, h);
            assert_eq!(controller.screen_size(), (w, h));
        }
        assert_eq!(controller.state(), SessionState::Fetching);
        assert_eq!(controller.exit_code(), None);
        assert!(sink.commands().is_empty());
    }

    #[test]
    fn resize_while_browsing_redraws_the_list() {
        let (mut controller, sink, _rx) = controller();
        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));
        sink.clear();

        controller.handle_resize(40, 10);
        assert_eq!(controller.screen_size(), (40, 10));
        assert!(sink.contains(&SinkCommand::ClearScreen));
        assert!(sink.contains(&SinkCommand::Highlighted("Theme 0 [light]".to_string())));
        assert_eq!(controller.exit_code(), None);
    }

    #[test]
    fn catalog_moves_to_browsing_once() {
        let (mut controller, sink, _rx) = controller();

        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));
        assert_eq!(controller.state(), SessionState::Browsing);
        assert_eq!(controller.catalog().map(|c| c.len()), Some(3));
        assert_eq!(controller.pending_diagnostic(), None);
        assert_eq!(controller.exit_code(), None);
        assert!(sink.contains(&SinkCommand::ClearScreen));
        assert!(sink.contains(&SinkCommand::CursorVisible(false)));

        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(5)));
        assert_eq!(controller.catalog().map(|c| c.len()), Some(3));
    }

    #[test]
    fn failure_keeps_fetching_and_quits_non_zero() {
        let (mut controller, _sink, _rx) = controller();

        controller.handle_fetch_outcome(FetchOutcome::Failure("timeout".to_string()));
        assert_eq!(controller.state(), SessionState::Fetching);
        assert_eq!(controller.pending_diagnostic(), Some("timeout"));
        assert_eq!(controller.exit_code(), Some(1));
        assert!(controller.catalog().is_none());
    }

    #[test]
    fn outcome_after_failure_is_ignored() {
        let (mut controller, _sink, _rx) = controller();

        controller.handle_fetch_outcome(FetchOutcome::Failure("timeout".to_string()));
        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));
        assert_eq!(controller.state(), SessionState::Fetching);
        assert!(controller.catalog().is_none());
    }

    #[test]
    fn escape_while_fetching_quits_cleanly() {
        let (mut controller, _sink, _rx) = controller();

        controller.handle_key_event(press(KeyCode::Char('x')), false);
        assert_eq!(controller.exit_code(), None);

        controller.handle_key_event(press(KeyCode::Esc), false);
        let exit = controller.exit_status();
        assert_eq!(exit.code, 0);
        assert_eq!(exit.diagnostic, None);
    }

    #[test]
    fn interrupt_and_end_of_input_quit_non_zero_in_any_state() {
        let (mut fetching, _, _rx) = controller();
        fetching.handle_interrupt();
        assert_eq!(fetching.exit_code(), Some(1));

        let (mut browsing, _, _rx) = controller();
        browsing.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));
        browsing.handle_end_of_input();
        assert_eq!(browsing.exit_code(), Some(1));
    }

    #[test]
    fn first_quit_request_wins() {
        let (mut controller, _sink, _rx) = controller();
        controller.handle_key_event(press(KeyCode::Esc), false);
        controller.handle_interrupt();
        assert_eq!(controller.exit_code(), Some(0));
    }

    #[test]
    fn browsing_moves_selection_and_picks_theme() {
        let (mut controller, _sink, _rx) = controller();
        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));

        controller.handle_key_event(press(KeyCode::Down), false);
        controller.handle_key_event(press(KeyCode::Down), false);
        controller.handle_key_event(press(KeyCode::Down), false);
        controller.handle_key_event(press(KeyCode::Up), false);
        controller.handle_key_event(press(KeyCode::Enter), false);

        let exit = controller.exit_status();
        assert_eq!(exit.code, 0);
        assert_eq!(exit.selected.as_deref(), Some("Theme 1"));
        assert_eq!(exit.diagnostic, None);
    }

    #[test]
    fn browsing_ignores_pasted_text() {
        let (mut controller, _sink, _rx) = controller();
        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));

        controller.handle_key_event(press(KeyCode::Char('q')), true);
        assert_eq!(controller.exit_code(), None);
        controller.handle_key_event(press(KeyCode::Char('q')), false);
        assert_eq!(controller.exit_code(), Some(0));
        assert_eq!(controller.exit_status().selected, None);
    }

    #[test]
    fn excluded_themes_are_skipped_when_picking() {
        let (tx, _rx) = outcome_channel();
        let runner = FetchRunner::new(Arc::new(StubSource::ready(sample_catalog(3))), tx);
        let options = UiOptions {
            exclude: vec!["Theme 0".to_string()],
            ..UiOptions::default()
        };
        let mut controller = Controller::new(RecordingSink::default(), runner, options);
        controller.handle_fetch_outcome(FetchOutcome::Catalog(sample_catalog(3)));

        controller.handle_key_event(press(KeyCode::End), false);
        controller.handle_key_event(press(KeyCode::Enter), false);
        assert_eq!(controller.exit_status().selected.as_deref(), Some("Theme 2"));
    }
}

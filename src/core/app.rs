//! State behind the interactive interface: the chat session plus the
//! presentation details (highlighted persona, scroll position, theme) that
//! the session itself does not care about.

use std::time::Instant;

use crate::core::persona::{Persona, PersonaCatalog};
use crate::core::session::{ExchangeOutcome, ExchangeRequest, Session};
use crate::ui::picker::PickerState;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Selector,
    Chat,
}

pub struct App {
    pub catalog: PersonaCatalog,
    pub session: Session,
    pub picker: PickerState,
    pub theme: Theme,
    pub model: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub pulse_start: Instant,
    pub exit_requested: bool,
    max_scroll: u16,
    current_exchange_id: u64,
}

impl App {
    pub fn new(catalog: PersonaCatalog, theme: Theme, model: impl Into<String>) -> Self {
        let picker = PickerState::from_catalog(&catalog);
        Self {
            catalog,
            session: Session::new(),
            picker,
            theme,
            model: model.into(),
            scroll_offset: 0,
            auto_scroll: true,
            pulse_start: Instant::now(),
            exit_requested: false,
            max_scroll: 0,
            current_exchange_id: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.session.selected_persona().is_some() {
            Screen::Chat
        } else {
            Screen::Selector
        }
    }

    pub fn active_persona(&self) -> Option<&Persona> {
        self.session.selected_persona()
    }

    /// Enter chat with the highlighted persona.
    pub fn confirm_selection(&mut self) -> bool {
        let Some(persona) = self
            .picker
            .selected_id()
            .and_then(|id| self.catalog.find_by_id(id))
            .cloned()
        else {
            return false;
        };
        self.enter_chat(persona);
        true
    }

    /// Enter chat with the persona at `index` in display order.
    pub fn select_index(&mut self, index: usize) -> bool {
        if !self.picker.select(index) {
            return false;
        }
        self.confirm_selection()
    }

    pub fn select_by_id(&mut self, id: &str) -> Result<(), String> {
        let persona = self.catalog.require(id)?.clone();
        if let Some(index) = self.catalog.list().iter().position(|p| p.id == id) {
            self.picker.select(index);
        }
        self.enter_chat(persona);
        Ok(())
    }

    fn enter_chat(&mut self, persona: Persona) {
        self.session.select_persona(persona);
        self.invalidate_exchange();
        self.scroll_to_bottom();
    }

    /// Submit the input buffer. The returned id must accompany the outcome.
    pub fn submit(&mut self) -> Option<(ExchangeRequest, u64)> {
        let request = self.session.submit_pending()?;
        self.current_exchange_id += 1;
        self.pulse_start = Instant::now();
        self.scroll_to_bottom();
        Some((request, self.current_exchange_id))
    }

    /// Apply an exchange outcome unless it belongs to an abandoned exchange.
    pub fn handle_outcome(&mut self, outcome: ExchangeOutcome, exchange_id: u64) -> bool {
        if exchange_id != self.current_exchange_id {
            tracing::debug!(exchange_id, "ignoring outcome of abandoned exchange");
            return false;
        }
        let applied = self.session.complete(outcome);
        if applied {
            self.scroll_to_bottom();
        }
        applied
    }

    /// Back to the selector. Any in-flight exchange is abandoned, not aborted.
    pub fn reset(&mut self) {
        self.session.reset();
        self.invalidate_exchange();
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    fn invalidate_exchange(&mut self) {
        self.current_exchange_id += 1;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
        if self.scroll_offset >= self.max_scroll {
            self.auto_scroll = true;
        }
    }

    /// Offset to render with, given how far the log can scroll.
    pub fn effective_scroll(&mut self, max_offset: u16) -> u16 {
        self.max_scroll = max_offset;
        if self.auto_scroll {
            self.scroll_offset = max_offset;
        } else {
            self.scroll_offset = self.scroll_offset.min(max_offset);
        }
        self.scroll_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::FALLBACK_REPLY;
    use crate::core::exchange::ExchangeError;
    use crate::core::message::Message;

    fn create_test_app() -> App {
        App::new(PersonaCatalog::builtin(), Theme::dark_default(), "test-model")
    }

    #[test]
    fn starts_on_selector() {
        let app = create_test_app();
        assert_eq!(app.screen(), Screen::Selector);
        assert!(app.active_persona().is_none());
    }

    #[test]
    fn confirm_selection_enters_chat_with_highlighted_persona() {
        let mut app = create_test_app();
        app.picker.move_down();
        assert!(app.confirm_selection());
        assert_eq!(app.screen(), Screen::Chat);
        assert_eq!(app.active_persona().map(|p| p.id.as_str()), Some("afia"));
    }

    #[test]
    fn select_by_id_reports_unknown_ids() {
        let mut app = create_test_app();
        assert!(app.select_by_id("nobody").is_err());
        assert_eq!(app.screen(), Screen::Selector);

        app.select_by_id("kitab").unwrap();
        assert_eq!(app.picker.selected_id(), Some("kitab"));
        assert_eq!(app.screen(), Screen::Chat);
    }

    #[test]
    fn outcome_for_current_exchange_is_applied() {
        let mut app = create_test_app();
        app.select_index(0);
        app.session.push_input_str("hello");
        let (request, id) = app.submit().expect("submission accepted");
        assert_eq!(request.user_text, "hello");
        assert!(app.session.is_busy());

        assert!(app.handle_outcome(Ok("R".to_string()), id));
        assert_eq!(
            app.session.messages(),
            &[Message::user("hello"), Message::character("R")]
        );
        assert!(!app.session.is_busy());
    }

    #[test]
    fn outcome_after_reset_is_ignored() {
        let mut app = create_test_app();
        app.select_index(2);
        app.session.push_input_str("hello");
        let (_, id) = app.submit().unwrap();

        app.reset();
        assert_eq!(app.screen(), Screen::Selector);
        assert!(!app.handle_outcome(Ok("late".to_string()), id));
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn outcome_after_reselect_does_not_leak_into_new_chat() {
        let mut app = create_test_app();
        app.select_index(0);
        app.session.push_input_str("hello");
        let (_, id) = app.submit().unwrap();

        app.reset();
        app.select_index(1);
        assert!(!app.handle_outcome(
            Err(ExchangeError::Transport("late".to_string())),
            id
        ));
        assert!(app.session.messages().is_empty());
        assert!(!app
            .session
            .messages()
            .iter()
            .any(|m| m.text == FALLBACK_REPLY));
    }

    #[test]
    fn scrolling_up_disables_auto_scroll_until_bottom() {
        let mut app = create_test_app();
        assert_eq!(app.effective_scroll(10), 10);

        app.scroll_up(3);
        assert!(!app.auto_scroll);
        assert_eq!(app.effective_scroll(10), 7);

        app.scroll_down(5);
        assert!(app.auto_scroll);
        assert_eq!(app.effective_scroll(12), 12);
    }
}

//! Main event loop for the interactive interface
//!
//! Draws the current screen, turns key presses into session transitions, and
//! feeds exchange outcomes back into the session as they arrive.

use std::{error::Error, io, sync::Arc, time::Duration};

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::core::app::{App, Screen};
use crate::core::exchange::ExchangeClient;
use crate::core::exchange_service::ExchangeService;
use crate::core::session::ExchangeRequest;
use crate::ui::renderer::ui;
use crate::utils::input::sanitize_text_input;

const PAGE_SCROLL: u16 = 10;

#[derive(Debug, PartialEq, Eq)]
pub enum KeyLoopAction {
    Continue,
    Submit(ExchangeRequest, u64),
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyLoopAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.exit_requested = true;
        return KeyLoopAction::Quit;
    }

    match app.screen() {
        Screen::Selector => handle_selector_key(app, key),
        Screen::Chat => handle_chat_key(app, key),
    }
}

fn handle_selector_key(app: &mut App, key: KeyEvent) -> KeyLoopAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.picker.move_up(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.picker.move_down(),
        KeyCode::Enter => {
            app.confirm_selection();
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_index(index);
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            app.exit_requested = true;
            return KeyLoopAction::Quit;
        }
        _ => {}
    }
    KeyLoopAction::Continue
}

fn handle_chat_key(app: &mut App, key: KeyEvent) -> KeyLoopAction {
    match key.code {
        KeyCode::Esc => app.reset(),
        KeyCode::Enter => {
            if let Some((request, id)) = app.submit() {
                return KeyLoopAction::Submit(request, id);
            }
        }
        KeyCode::Backspace => app.session.pop_input(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(PAGE_SCROLL),
        KeyCode::PageDown => app.scroll_down(PAGE_SCROLL),
        KeyCode::End => app.scroll_to_bottom(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.session.push_input(c)
        }
        _ => {}
    }
    KeyLoopAction::Continue
}

/// Pasted text lands in the input box on the chat screen only.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.screen() == Screen::Chat {
        app.session.push_input_str(&sanitize_text_input(text));
    }
}

type ChatTerminal = Terminal<CrosstermBackend<io::Stdout>>;

fn enter_terminal() -> Result<ChatTerminal, Box<dyn Error>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Run `setup`; if it fails, run `restore` before handing back the error.
fn setup_or_restore<T, E>(
    setup: impl FnOnce() -> Result<T, E>,
    restore: impl FnOnce(),
) -> Result<T, E> {
    setup().inspect_err(|_| restore())
}

pub async fn run_chat(mut app: App, client: Arc<dyn ExchangeClient>) -> Result<(), Box<dyn Error>> {
    let (service, mut rx) = ExchangeService::new(client);

    enable_raw_mode()?;
    let mut terminal = setup_or_restore(enter_terminal, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        let _ = disable_raw_mode();
    })?;
    info!(model = %app.model, "interactive session started");

    let result: Result<(), Box<dyn Error>> = async {
        loop {
            terminal.draw(|f| ui(f, &mut app))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match handle_key(&mut app, key) {
                            KeyLoopAction::Quit => break,
                            KeyLoopAction::Submit(request, id) => {
                                service.spawn_exchange(request, id)
                            }
                            KeyLoopAction::Continue => {}
                        }
                    }
                    Event::Paste(text) => handle_paste(&mut app, &text),
                    _ => {}
                }
            }

            while let Ok((outcome, id)) = rx.try_recv() {
                app.handle_outcome(outcome, id);
            }

            if app.exit_requested {
                break;
            }
        }
        Ok(())
    }
    .await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    info!("interactive session ended");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persona::PersonaCatalog;
    use crate::ui::theme::Theme;

    fn create_test_app() -> App {
        App::new(PersonaCatalog::builtin(), Theme::dark_default(), "test-model")
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(app, press(KeyCode::Char(c))), KeyLoopAction::Continue);
        }
    }

    #[test]
    fn failed_setup_restores_terminal_state() {
        let mut restored = false;
        let result: Result<(), &str> = setup_or_restore(|| Err("no tty"), || restored = true);
        assert_eq!(result, Err("no tty"));
        assert!(restored);

        let mut restored = false;
        let result: Result<u8, &str> = setup_or_restore(|| Ok(7), || restored = true);
        assert_eq!(result, Ok(7));
        assert!(!restored);
    }

    #[test]
    fn digit_selects_persona_directly() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.active_persona().map(|p| p.id.as_str()), Some("easar"));

        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Char('9')));
        assert_eq!(app.screen(), Screen::Selector);
    }

    #[test]
    fn arrows_and_enter_select_persona() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Up));
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.active_persona().map(|p| p.id.as_str()), Some("afia"));
    }

    #[test]
    fn enter_submits_and_is_disabled_while_busy() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "hello");

        let action = handle_key(&mut app, press(KeyCode::Enter));
        let KeyLoopAction::Submit(request, id) = action else {
            panic!("expected submission, got {action:?}");
        };
        assert_eq!(request.user_text, "hello");
        assert!(request.instruction_prompt.starts_with("أنت عوافي"));

        type_text(&mut app, "again");
        assert_eq!(app.session.pending_input(), "");
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Enter)),
            KeyLoopAction::Continue
        );

        app.handle_outcome(Ok("R".to_string()), id);
        assert!(!app.session.is_busy());
    }

    #[test]
    fn blank_input_does_not_submit() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "   ");
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Enter)),
            KeyLoopAction::Continue
        );
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn escape_resets_chat_then_quits_from_selector() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "hi");
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), KeyLoopAction::Continue);
        assert_eq!(app.screen(), Screen::Selector);
        assert_eq!(app.session.pending_input(), "");

        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), KeyLoopAction::Quit);
        assert!(app.exit_requested);
    }

    #[test]
    fn ctrl_c_quits_from_chat() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Enter));
        let action = handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert_eq!(action, KeyLoopAction::Quit);
        assert_eq!(app.session.pending_input(), "");
    }

    #[test]
    fn q_is_typed_in_chat_but_quits_selector() {
        let mut app = create_test_app();
        handle_key(&mut app, press(KeyCode::Enter));
        type_text(&mut app, "q");
        assert_eq!(app.session.pending_input(), "q");
    }

    #[test]
    fn paste_is_flattened_and_ignored_on_selector() {
        let mut app = create_test_app();
        handle_paste(&mut app, "ignored");
        handle_key(&mut app, press(KeyCode::Enter));
        handle_paste(&mut app, "line one\nline two");
        assert_eq!(app.session.pending_input(), "line one line two");
    }
}

//! Keybinding dispatcher for skypulse.
//!
//! Translates crossterm `KeyEvent`s into `AppState` mutations and returns a
//! `KeyAction` telling the event loop whether to continue or quit. Dispatch
//! branches first on `state.mode` so each mode has its own handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Integrations => handle_integrations(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Normal => handle_normal(key, state),
        Mode::Insert => handle_insert(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }
    if let Some(action) = handle_monitor_key(key, state) {
        return action;
    }

    match key.code {
        KeyCode::Char('H') => state.focus = state.focus.prev(),
        KeyCode::Char('L') => state.focus = state.focus.next(),

        KeyCode::Char('<') => state.shrink_report_panel(),
        KeyCode::Char('>') => state.grow_report_panel(),

        KeyCode::Char('i') => {
            state.focus = PanelFocus::Chat;
            state.mode = Mode::Insert;
        }
        KeyCode::Char('T') => state.chat.toggle_thinking(),

        KeyCode::Char('v') => state.show_log = !state.show_log,
        KeyCode::Char('I') => state.mode = Mode::Integrations,
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            if state.has_unsent_chat() {
                state.mode = Mode::ConfirmQuit;
            } else {
                return KeyAction::Quit;
            }
        }

        _ => {}
    }
    KeyAction::Continue
}

/// Dashboard actions: start, live toggle, refresh, category scope.
///
/// Returns `None` when the key is not one of them.
fn handle_monitor_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') => state.start_initial(),
        KeyCode::Char(' ') | KeyCode::Char('p') => state.toggle_live(),
        KeyCode::Char('r') => state.refresh(),
        KeyCode::Char('[') => state.cycle_category(false),
        KeyCode::Char(']') => state.cycle_category(true),
        KeyCode::Char('x') => state.clear_category(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

/// j / k / g / G and the Ctrl page keys. `None` when not a scroll key.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') => state.scroll_top(),
        KeyCode::Char('G') => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        _ => return None,
    }
    Some(KeyAction::Continue)
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_integrations(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if matches!(key.code, KeyCode::Char('I') | KeyCode::Esc | KeyCode::Char('q')) {
        state.mode = Mode::Normal;
    }
    KeyAction::Continue
}

/// `y` quits; `n` or `Esc` goes back to Normal mode.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

/// Edits the chat draft. `Enter` sends and stays in Insert mode.
fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Enter => state.send_chat(),
        KeyCode::Backspace => {
            state.chat_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.chat_input.clear();
        }
        KeyCode::Char(c) => state.chat_input.push(c),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Left click focuses a panel; the wheel scrolls the focused panel by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => focus_at(mouse.column, mouse.row, state),
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

/// Collapsed (zero-width) panels cannot take focus.
fn focus_at(col: u16, row: u16, state: &mut AppState) {
    let pos = Position { x: col, y: row };
    let [feed, report, chat] = state.panel_rects;

    if feed.width > 0 && feed.contains(pos) {
        state.focus = PanelFocus::Feed;
    } else if report.contains(pos) {
        state.focus = PanelFocus::Report;
    } else if chat.width > 0 && chat.contains(pos) {
        state.focus = PanelFocus::Chat;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;
    use crate::app::tests::test_state;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_without_draft_exits_immediately() {
        let (mut state, _rx) = test_state();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn quit_with_draft_asks_first() {
        let (mut state, _rx) = test_state();
        handle_key(press(KeyCode::Char('i')), &mut state);
        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.focus, PanelFocus::Chat);
        for c in "hi".chars() {
            handle_key(press(KeyCode::Char(c)), &mut state);
        }
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.chat_input, "hi");

        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::ConfirmQuit);
        handle_key(press(KeyCode::Char('n')), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        handle_key(press(KeyCode::Char('q')), &mut state);
        assert_eq!(handle_key(press(KeyCode::Char('y')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn insert_mode_keys_do_not_trigger_commands() {
        let (mut state, _rx) = test_state();
        state.mode = Mode::Insert;
        for c in "rqp ".chars() {
            assert_eq!(handle_key(press(KeyCode::Char(c)), &mut state), KeyAction::Continue);
        }
        assert_eq!(state.chat_input, "rqp ");
        assert!(!state.monitor.is_live());
        handle_key(press(KeyCode::Backspace), &mut state);
        assert_eq!(state.chat_input, "rqp");
    }

    #[test]
    fn overlays_open_and_close() {
        let (mut state, _rx) = test_state();
        handle_key(press(KeyCode::Char('I')), &mut state);
        assert_eq!(state.mode, Mode::Integrations);
        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);

        handle_key(press(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(press(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);
        handle_key(press(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn click_focuses_panel_under_cursor() {
        let (mut state, _rx) = test_state();
        state.panel_rects = [
            Rect::new(0, 0, 30, 40),
            Rect::new(29, 0, 50, 40),
            Rect::new(78, 0, 40, 40),
        ];
        let click = |col| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(click(5), &mut state);
        assert_eq!(state.focus, PanelFocus::Feed);
        handle_mouse(click(100), &mut state);
        assert_eq!(state.focus, PanelFocus::Chat);
        handle_mouse(click(50), &mut state);
        assert_eq!(state.focus, PanelFocus::Report);
    }

    #[test]
    fn live_toggle_is_blocked_while_loading() {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let _guard = rt.enter();
        let (mut state, _rx) = test_state();
        handle_key(press(KeyCode::Enter), &mut state);
        assert!(state.monitor.is_loading());
        handle_key(press(KeyCode::Char(' ')), &mut state);
        assert!(!state.monitor.is_live());
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{App, Focus};
use crate::tui::AppEvent;

/// Lines moved per scroll step in the message list.
const SCROLL_STEP: u16 = 3;

/// What a key press means for the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    InsertNewline,
    Insert(char),
    Backspace,
    CursorLeft,
    CursorRight,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ToggleFocus,
    Quit,
    Ignore,
}

/// Map a key to an [`Action`] given the focused element.
///
/// On the input, Enter without Shift submits and Shift+Enter adds a newline.
/// On the send button, Enter or Space presses it.
pub fn key_action(key: KeyEvent, focus: Focus) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Tab | KeyCode::BackTab => return Action::ToggleFocus,
        KeyCode::Up => return Action::ScrollUp,
        KeyCode::Down => return Action::ScrollDown,
        KeyCode::PageUp => return Action::PageUp,
        KeyCode::PageDown => return Action::PageDown,
        _ => {}
    }

    match focus {
        Focus::Input => match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => Action::InsertNewline,
            KeyCode::Enter => Action::Submit,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Action::Insert(c),
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Left => Action::CursorLeft,
            KeyCode::Right => Action::CursorRight,
            _ => Action::Ignore,
        },
        Focus::SendButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Action::Submit,
            _ => Action::Ignore,
        },
    }
}

pub fn handle_event(app: &mut App, event: AppEvent, tx: &UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Key(key) => {
            let action = key_action(key, app.focus());
            apply(app, action, tx);
        }
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse, tx),
        AppEvent::Resize(_, _) => {}
        AppEvent::Answer(outcome) => app.settle(outcome),
    }
}

pub fn apply(app: &mut App, action: Action, tx: &UnboundedSender<AppEvent>) {
    match action {
        Action::Submit => {
            app.submit(tx);
        }
        Action::InsertNewline => app.panel_mut().insert_newline(),
        Action::Insert(c) => app.panel_mut().insert_char(c),
        Action::Backspace => app.panel_mut().backspace(),
        Action::CursorLeft => app.panel_mut().move_left(),
        Action::CursorRight => app.panel_mut().move_right(),
        Action::ScrollUp => app.panel_mut().scroll_up(SCROLL_STEP),
        Action::ScrollDown => app.panel_mut().scroll_down(SCROLL_STEP),
        Action::PageUp => {
            let page = app.page_size();
            app.panel_mut().scroll_up(page);
        }
        Action::PageDown => {
            let page = app.page_size();
            app.panel_mut().scroll_down(page);
        }
        Action::ToggleFocus => app.toggle_focus(),
        Action::Quit => app.should_quit = true,
        Action::Ignore => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, tx: &UnboundedSender<AppEvent>) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A disabled button swallows the click.
            if app.hits_send_button(mouse.column, mouse.row) && app.panel().send_enabled() {
                app.panel_mut().blur_input();
                app.submit(tx);
            }
        }
        MouseEventKind::ScrollUp => app.panel_mut().scroll_up(SCROLL_STEP),
        MouseEventKind::ScrollDown => app.panel_mut().scroll_down(SCROLL_STEP),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn enter_submits_shift_enter_does_not() {
        assert_eq!(
            key_action(key(KeyCode::Enter, KeyModifiers::NONE), Focus::Input),
            Action::Submit
        );
        assert_eq!(
            key_action(key(KeyCode::Enter, KeyModifiers::SHIFT), Focus::Input),
            Action::InsertNewline
        );
    }

    #[test]
    fn send_button_activates_on_enter_or_space() {
        assert_eq!(
            key_action(key(KeyCode::Enter, KeyModifiers::NONE), Focus::SendButton),
            Action::Submit
        );
        assert_eq!(
            key_action(key(KeyCode::Char(' '), KeyModifiers::NONE), Focus::SendButton),
            Action::Submit
        );
        assert_eq!(
            key_action(key(KeyCode::Char('a'), KeyModifiers::NONE), Focus::SendButton),
            Action::Ignore
        );
    }

    #[test]
    fn typing_and_quitting() {
        assert_eq!(
            key_action(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Focus::Input),
            Action::Insert('A')
        );
        assert_eq!(
            key_action(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Focus::Input),
            Action::Quit
        );
        assert_eq!(
            key_action(key(KeyCode::Esc, KeyModifiers::NONE), Focus::SendButton),
            Action::Quit
        );
        assert_eq!(
            key_action(key(KeyCode::Tab, KeyModifiers::NONE), Focus::Input),
            Action::ToggleFocus
        );
    }

    #[test]
    fn page_keys_scroll_by_page() {
        assert_eq!(
            key_action(key(KeyCode::PageUp, KeyModifiers::NONE), Focus::Input),
            Action::PageUp
        );
        assert_eq!(
            key_action(key(KeyCode::PageDown, KeyModifiers::NONE), Focus::SendButton),
            Action::PageDown
        );
        assert_eq!(
            key_action(key(KeyCode::Up, KeyModifiers::NONE), Focus::Input),
            Action::ScrollUp
        );
    }
}

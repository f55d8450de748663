use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use smol_str::{SmolStr, ToSmolStr};

/// Centrally defined key actions for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Select,
    Back,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    NextField,
    Dashboard,
    Wrapped,
    History,
    Logs,
    CycleRange,
    Refresh,
    Share,
    Preview,
    StopPreview,
    Delete,
    Logout,
    Option(usize),
    Char(char),
    DeleteChar,
    ClearLine,
}

// ── Key code constants ───────────────────────────────────────────

pub const KEY_QUIT: KeyCode = KeyCode::Char('q');
pub const KEY_WRAPPED: KeyCode = KeyCode::Char('w');
pub const KEY_HISTORY: KeyCode = KeyCode::Char('h');
pub const KEY_DASHBOARD: KeyCode = KeyCode::Char('d');
pub const KEY_LOGS: KeyCode = KeyCode::Char('L');
pub const KEY_CYCLE_RANGE: KeyCode = KeyCode::Char('t');
pub const KEY_REFRESH: KeyCode = KeyCode::Char('r');
pub const KEY_SHARE: KeyCode = KeyCode::Char('s');
pub const KEY_PREVIEW: KeyCode = KeyCode::Char('p');
pub const KEY_STOP_PREVIEW: KeyCode = KeyCode::Char('x');
pub const KEY_DELETE: KeyCode = KeyCode::Char('D');
pub const KEY_LOGOUT: KeyCode = KeyCode::Char('o');
pub const KEY_SELECT: KeyCode = KeyCode::Enter;
pub const KEY_BACK: KeyCode = KeyCode::Esc;
pub const KEY_NEXT_FIELD: KeyCode = KeyCode::Tab;
pub const KEY_UP: KeyCode = KeyCode::Up;
pub const KEY_DOWN: KeyCode = KeyCode::Down;
pub const KEY_LEFT: KeyCode = KeyCode::Left;
pub const KEY_RIGHT: KeyCode = KeyCode::Right;
pub const KEY_PAGE_UP: KeyCode = KeyCode::PageUp;
pub const KEY_PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const KEY_GOTO_TOP: KeyCode = KeyCode::Home;
pub const KEY_GOTO_BOTTOM: KeyCode = KeyCode::End;
pub const KEY_DELETE_CHAR: KeyCode = KeyCode::Backspace;
pub const KEY_CONFIRM_YES: KeyCode = KeyCode::Char('y');

impl Action {
    /// Label shown in the help bar. Returns `None` for actions that
    /// shouldn't appear (navigation, text input, etc.).
    pub fn help_label(&self) -> Option<(SmolStr, SmolStr)> {
        let (key, desc): (KeyCode, SmolStr) = match self {
            Action::Quit => (KEY_QUIT, "quit".into()),
            Action::Wrapped => (KEY_WRAPPED, "wrapped".into()),
            Action::History => (KEY_HISTORY, "history".into()),
            Action::Dashboard => (KEY_DASHBOARD, "dashboard".into()),
            Action::Logs => (KEY_LOGS, "logs".into()),
            Action::CycleRange => (KEY_CYCLE_RANGE, "range".into()),
            Action::Refresh => (KEY_REFRESH, "refresh".into()),
            Action::Share => (KEY_SHARE, "share".into()),
            Action::Preview => (KEY_PREVIEW, "preview".into()),
            Action::StopPreview => (KEY_STOP_PREVIEW, "stop".into()),
            Action::Delete => (KEY_DELETE, "delete".into()),
            Action::Logout => (KEY_LOGOUT, "logout".into()),
            Action::Select => (KEY_SELECT, "select".into()),
            Action::Back => (KEY_BACK, "back".into()),
            Action::MoveRight => (KEY_RIGHT, "next".into()),
            Action::MoveLeft => (KEY_LEFT, "prev".into()),
            _ => return None,
        };
        let key_str: SmolStr = key.to_smolstr().to_lowercase().into();
        Some((key_str, desc))
    }
}

/// Resolve a key event in a text-entry form (login, register, the OAuth
/// code field). Printable characters go to the focused field.
pub fn form_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK => Some(Action::Back),
        KEY_SELECT => Some(Action::Select),
        KEY_NEXT_FIELD | KEY_DOWN => Some(Action::NextField),
        KEY_UP => Some(Action::MoveUp),
        KEY_DELETE_CHAR => Some(Action::DeleteChar),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                Some(Action::ClearLine)
            } else {
                Some(Action::Char(c))
            }
        }
        _ => None,
    }
}

/// Resolve a key event on the dashboard.
pub fn dashboard_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_WRAPPED => Some(Action::Wrapped),
        KEY_HISTORY => Some(Action::History),
        KEY_LOGS => Some(Action::Logs),
        KEY_CYCLE_RANGE => Some(Action::CycleRange),
        KEY_REFRESH => Some(Action::Refresh),
        KEY_LOGOUT => Some(Action::Logout),
        KEY_DELETE => Some(Action::Delete),
        KEY_LEFT => Some(Action::MoveLeft),
        KEY_RIGHT => Some(Action::MoveRight),
        KEY_SELECT => Some(Action::Select),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        _ => None,
    }
}

/// Resolve a key event in the slideshow.
pub fn slides_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_BACK => Some(Action::Back),
        KEY_RIGHT | KEY_SELECT => Some(Action::MoveRight),
        KEY_LEFT => Some(Action::MoveLeft),
        KEY_REFRESH => Some(Action::Refresh),
        KEY_SHARE => Some(Action::Share),
        KEY_PREVIEW => Some(Action::Preview),
        KEY_STOP_PREVIEW => Some(Action::StopPreview),
        KeyCode::Char(c @ '1'..='4') => Some(Action::Option(c as usize - '1' as usize)),
        _ => None,
    }
}

/// Resolve a key event in the history listing.
pub fn history_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_BACK => Some(Action::Back),
        KEY_DASHBOARD => Some(Action::Dashboard),
        KEY_LOGS => Some(Action::Logs),
        KEY_REFRESH => Some(Action::Refresh),
        KEY_DELETE => Some(Action::Delete),
        KEY_SELECT => Some(Action::Select),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

/// Resolve a key event in the log view.
pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_BACK | KEY_LOGS => Some(Action::Back),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

/// Resolve a key event in a yes/no confirmation.
pub fn confirm_action(key: &KeyEvent) -> Action {
    match key.code {
        KEY_CONFIRM_YES => Action::Select,
        _ => Action::Back,
    }
}

// Key-to-action mapping, independent of the render surface.
//
// The viewer's behavior is decided here and in `ViewerApp::apply`; the
// terminal only supplies key events and draws the result. That keeps
// paging and theme logic testable without a TTY.

use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextPage,
    PrevPage,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    JumpTop,
    JumpBottom,
    ToggleTheme,
    ToggleHelp,
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('n') | KeyCode::PageDown => Some(Action::NextPage),
        KeyCode::Char('p') | KeyCode::PageUp => Some(Action::PrevPage),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::ScrollLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::ScrollRight),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::JumpTop),
        KeyCode::End | KeyCode::Char('G') => Some(Action::JumpBottom),
        _ => None,
    }
}

//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::CandidateFile;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Path input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    /// Enter pressed in the path field. Intercepted by the UI adapter, which
    /// reads the file and forwards `FileChosen` or `SelectionFailed` instead.
    SubmitPath,

    // Selection
    /// A file was read from disk and is offered for selection
    FileChosen(CandidateFile),
    /// The adapter could not read the chosen path
    SelectionFailed(String),
    RemoveFile,

    // Actions
    Convert,
    Download,
    DismissNotice,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, input_mode: InputMode, show_help: bool) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
            KeyCode::Char('x') => Some(UiEvent::RemoveFile),
            KeyCode::Char('c') | KeyCode::Char('s') => Some(UiEvent::Convert),
            KeyCode::Char('d') => Some(UiEvent::Download),
            KeyCode::Esc => Some(UiEvent::DismissNotice),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Enter => Some(UiEvent::SubmitPath),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_actions() {
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('c')), InputMode::Normal, false),
            Some(UiEvent::Convert)
        ));
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('d')), InputMode::Normal, false),
            Some(UiEvent::Download)
        ));
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('x')), InputMode::Normal, false),
            Some(UiEvent::RemoveFile)
        ));
    }

    #[test]
    fn test_editing_mode_enter_submits_path() {
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Enter), InputMode::Editing, false),
            Some(UiEvent::SubmitPath)
        ));
        // Plain characters go into the buffer instead of triggering actions.
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('c')), InputMode::Editing, false),
            Some(UiEvent::CharInput('c'))
        ));
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('c')), InputMode::Normal, true),
            Some(UiEvent::CloseHelp)
        ));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = press(KeyCode::Char('c'));
        key.kind = KeyEventKind::Release;
        assert!(key_to_ui_event(key, InputMode::Normal, false).is_none());
    }
}

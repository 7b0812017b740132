//! Key bindings

use crate::chat::DraftEdit;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE: u16 = 10;

/// What a key press asks the UI to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Edit(DraftEdit),
    Submit,
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollToBottom,
    Quit,
}

/// Map a key press to an action.
///
/// Plain Enter submits. Enter with Shift or Alt inserts a line break, as does
/// Ctrl+J for terminals that cannot report modifiers on Enter.
pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let action = match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if ctrl => InputAction::Quit,
        KeyCode::Char('j') if ctrl => InputAction::Edit(DraftEdit::Newline),
        KeyCode::Char('u') if ctrl => InputAction::Edit(DraftEdit::Clear),
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => InputAction::Edit(DraftEdit::Insert(c)),
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            InputAction::Edit(DraftEdit::Newline)
        }
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Backspace => InputAction::Edit(DraftEdit::Backspace),
        KeyCode::Up => InputAction::ScrollUp(1),
        KeyCode::Down => InputAction::ScrollDown(1),
        KeyCode::PageUp => InputAction::ScrollUp(PAGE),
        KeyCode::PageDown => InputAction::ScrollDown(PAGE),
        KeyCode::End => InputAction::ScrollToBottom,
        _ => return None,
    };
    Some(action)
}

/// Turn pasted text into one draft edit, keeping line breaks
pub fn paste_edit(text: &str) -> Option<DraftEdit> {
    let pasted: String = text.chars().filter(|c| *c != '\r').collect();
    (!pasted.is_empty()).then_some(DraftEdit::Paste(pasted))
}

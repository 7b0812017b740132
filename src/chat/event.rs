//! Events that drive the conversation

use crate::client::AskErrorKind;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Input events
    /// Replace the draft verbatim
    DraftChanged { text: String },
    /// Keystroke-level edit of the draft
    DraftEdited(DraftEdit),
    /// Send the current draft
    Submit,

    // Exchange events
    AnswerReceived { answer: String },
    ExchangeFailed {
        kind: AskErrorKind,
        message: String,
    },
}

/// Single edit applied to the end of the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Insert(char),
    /// Pasted text, appended in one step
    Paste(String),
    Newline,
    Backspace,
    Clear,
}

impl DraftEdit {
    /// Apply the edit to a draft, producing the new text
    pub fn apply(self, draft: &str) -> String {
        let mut text = draft.to_string();
        match self {
            DraftEdit::Insert(c) => text.push(c),
            DraftEdit::Paste(pasted) => text.push_str(&pasted),
            DraftEdit::Newline => text.push('\n'),
            DraftEdit::Backspace => {
                text.pop();
            }
            DraftEdit::Clear => text.clear(),
        }
        text
    }
}

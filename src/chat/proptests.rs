//! Property-based tests for the conversation state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::client::AskErrorKind;
use crate::message::{Message, Origin};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_draft_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ?!]{1,30}",
        "[ \t\n]{0,5}",
        Just(String::new()),
    ]
}

fn arb_error_kind() -> impl Strategy<Value = AskErrorKind> {
    prop_oneof![
        Just(AskErrorKind::Network),
        Just(AskErrorKind::Timeout),
        Just(AskErrorKind::Status),
        Just(AskErrorKind::Malformed),
        Just(AskErrorKind::Unknown),
    ]
}

fn arb_draft_edit() -> impl Strategy<Value = DraftEdit> {
    prop_oneof![
        any::<char>().prop_map(DraftEdit::Insert),
        "[a-z \n]{0,8}".prop_map(DraftEdit::Paste),
        Just(DraftEdit::Newline),
        Just(DraftEdit::Backspace),
        Just(DraftEdit::Clear),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_draft_text().prop_map(|text| Event::DraftChanged { text }),
        arb_draft_edit().prop_map(Event::DraftEdited),
        Just(Event::Submit),
        Just(Event::Submit),
        "[a-zA-Z ]{0,20}".prop_map(|answer| Event::AnswerReceived { answer }),
        (arb_error_kind(), "[a-z ]{0,20}")
            .prop_map(|(kind, message)| Event::ExchangeFailed { kind, message }),
    ]
}

fn send_queries(result: &TransitionResult) -> usize {
    result
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::SendQuery { .. }))
        .count()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The list only grows and earlier entries never change
    #[test]
    fn prop_messages_are_append_only(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = ChatContext::default();
        let mut conv = Conversation::default();

        for event in events {
            let before: Vec<Message> = conv.messages().to_vec();
            let _ = transition(&mut conv, &ctx, event);
            prop_assert!(conv.messages().len() >= before.len());
            prop_assert!(conv.messages().len() <= before.len() + 1);
            prop_assert_eq!(&conv.messages()[..before.len()], &before[..]);
        }
    }

    /// Awaiting exactly when a user turn has no bot reply yet
    #[test]
    fn prop_awaiting_matches_unanswered_turn(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = ChatContext::default();
        let mut conv = Conversation::default();

        for event in events {
            let _ = transition(&mut conv, &ctx, event);
            let users = conv.count_by_origin(Origin::User);
            let bots = conv.count_by_origin(Origin::Bot);
            prop_assert_eq!(conv.is_awaiting_response(), users == bots);
            prop_assert!(users <= bots);
        }
    }

    /// An accepted submission emits exactly one query carrying the pre-clear draft
    #[test]
    fn prop_accepted_submit_sends_one_query(draft in arb_draft_text()) {
        let ctx = ChatContext::default();
        let mut conv = Conversation::default();
        conv.set_draft_text(draft.clone());

        match transition(&mut conv, &ctx, Event::Submit) {
            Ok(result) => {
                prop_assert!(!draft.trim().is_empty());
                prop_assert_eq!(send_queries(&result), 1);
                prop_assert!(result.effects.contains(&Effect::send_query(draft.clone())));
                prop_assert!(result.effects.contains(&Effect::ScrollToLatest));
                prop_assert_eq!(conv.draft(), "");
            }
            Err(e) => {
                prop_assert_eq!(e, TransitionError::EmptyDraft);
                prop_assert!(draft.trim().is_empty());
                prop_assert_eq!(conv.messages().len(), 1);
                prop_assert_eq!(conv.draft(), draft.as_str());
            }
        }
    }

    /// While awaiting, no submission is accepted whatever the draft
    #[test]
    fn prop_no_second_exchange_in_flight(
        first in "[a-z]{1,10}",
        drafts in proptest::collection::vec(arb_draft_text(), 1..10),
    ) {
        let ctx = ChatContext::default();
        let mut conv = Conversation::default();
        conv.set_draft_text(first);
        transition(&mut conv, &ctx, Event::Submit).unwrap();

        for draft in drafts {
            conv.set_draft_text(draft);
            let result = transition(&mut conv, &ctx, Event::Submit);
            prop_assert_eq!(result, Err(TransitionError::AwaitingResponse));
            prop_assert_eq!(conv.messages().len(), 2);
        }
    }

    /// Every resolution kind yields exactly one bot message and clears the flag
    #[test]
    fn prop_any_resolution_ends_exchange(
        query in "[a-z]{1,10}",
        resolution in prop_oneof![
            "[a-zA-Z ]{0,20}".prop_map(|answer| Event::AnswerReceived { answer }),
            (arb_error_kind(), "[a-z ]{0,20}")
                .prop_map(|(kind, message)| Event::ExchangeFailed { kind, message }),
        ],
    ) {
        let ctx = ChatContext::default();
        let mut conv = Conversation::default();
        conv.set_draft_text(query);
        transition(&mut conv, &ctx, Event::Submit).unwrap();
        let bots_before = conv.count_by_origin(Origin::Bot);

        transition(&mut conv, &ctx, resolution).unwrap();

        prop_assert_eq!(conv.count_by_origin(Origin::Bot), bots_before + 1);
        prop_assert!(!conv.is_awaiting_response());
    }
}

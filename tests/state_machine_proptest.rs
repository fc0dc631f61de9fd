//! Property-based tests for the invitation state machine
//!
//! Uses proptest to generate random inputs and verify properties

use proptest::prelude::*;

use pinboard::shared::{InvitationAction, InvitationStatus};

fn status_strategy() -> impl Strategy<Value = InvitationStatus> {
    prop_oneof![
        Just(InvitationStatus::Pending),
        Just(InvitationStatus::Accepted),
        Just(InvitationStatus::Declined),
        Just(InvitationStatus::Ignored),
    ]
}

fn action_strategy() -> impl Strategy<Value = InvitationAction> {
    prop_oneof![
        Just(InvitationAction::Accept),
        Just(InvitationAction::Decline),
        Just(InvitationAction::Ignore),
    ]
}

proptest! {
    #[test]
    fn test_terminal_states_never_transition(
        from in status_strategy(),
        next in status_strategy(),
    ) {
        if from.is_terminal() {
            prop_assert!(!from.can_transition_to(next));
        }
    }

    #[test]
    fn test_pending_transitions_exactly_to_terminal_states(next in status_strategy()) {
        prop_assert_eq!(
            InvitationStatus::Pending.can_transition_to(next),
            next.is_terminal()
        );
    }

    #[test]
    fn test_every_action_resolves_a_pending_invitation(action in action_strategy()) {
        let next = action.resulting_status();
        prop_assert!(next.is_terminal());
        prop_assert!(InvitationStatus::Pending.can_transition_to(next));
    }

    #[test]
    fn test_status_string_roundtrip(status in status_strategy()) {
        prop_assert_eq!(InvitationStatus::from_str(status.as_str()), Some(status));
    }

    #[test]
    fn test_status_parsing_is_case_insensitive(status in status_strategy()) {
        let upper = status.as_str().to_uppercase();
        prop_assert_eq!(InvitationStatus::from_str(&upper), Some(status));
    }

    #[test]
    fn test_unknown_status_strings_rejected(s in "[a-z]{1,12}") {
        prop_assume!(!["pending", "accepted", "declined", "ignored"].contains(&s.as_str()));
        prop_assert_eq!(InvitationStatus::from_str(&s), None);
    }

    #[test]
    fn test_serde_form_matches_storage_form(status in status_strategy()) {
        let json = serde_json::to_string(&status).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", status.as_str()));
    }
}

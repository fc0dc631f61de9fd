//! Notification type definitions.
//!
//! One notification is emitted per qualifying state transition: a new
//! follower, a like or save on someone else's pin, and the invitation
//! lifecycle (received / accepted). Emission is best-effort and never
//! fails the triggering operation.

use serde::{Deserialize, Serialize};

/// The qualifying state transitions that fan out a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewFollower,
    PinLiked,
    PinSaved,
    InvitationReceived,
    InvitationAccepted,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::NewFollower => "new_follower",
            NotificationType::PinLiked => "pin_liked",
            NotificationType::PinSaved => "pin_saved",
            NotificationType::InvitationReceived => "invitation_received",
            NotificationType::InvitationAccepted => "invitation_accepted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new_follower" => Some(NotificationType::NewFollower),
            "pin_liked" => Some(NotificationType::PinLiked),
            "pin_saved" => Some(NotificationType::PinSaved),
            "invitation_received" => Some(NotificationType::InvitationReceived),
            "invitation_accepted" => Some(NotificationType::InvitationAccepted),
            _ => None,
        }
    }
}

impl TryFrom<String> for NotificationType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s).ok_or_else(|| format!("unknown notification type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_string_roundtrip() {
        for ty in [
            NotificationType::NewFollower,
            NotificationType::PinLiked,
            NotificationType::PinSaved,
            NotificationType::InvitationReceived,
            NotificationType::InvitationAccepted,
        ] {
            assert_eq!(NotificationType::from_str(ty.as_str()), Some(ty));
        }
    }
}

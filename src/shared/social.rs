//! Social-domain enums: board visibility, collaborator permission and the
//! invitation state machine.
//!
//! `InvitationStatus` carries the explicit allowed-transition table: the
//! only legal transitions are PENDING -> ACCEPTED | DECLINED | IGNORED.
//! Terminal states admit no further transitions.

use serde::{Deserialize, Serialize};

/// Board / pin visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl TryFrom<String> for Visibility {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s).ok_or_else(|| format!("unknown visibility: {}", s))
    }
}

/// Permission level carried by an invitation and its collaborator grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// May view the board regardless of visibility
    View,
    /// May create, update and delete pins on the board
    Edit,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Edit => "edit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "view" => Some(Permission::View),
            "edit" => Some(Permission::Edit),
            _ => None,
        }
    }
}

impl TryFrom<String> for Permission {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s).ok_or_else(|| format!("unknown permission: {}", s))
    }
}

/// Invitation lifecycle status
///
/// PENDING is the initial state; ACCEPTED, DECLINED and IGNORED are
/// terminal. Re-responding to a resolved invitation is an error, not an
/// idempotent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    /// Awaiting a response from the invitee
    Pending,
    /// Invitee accepted; a collaborator grant was materialized
    Accepted,
    /// Invitee declined
    Declined,
    /// Invitee ignored the invitation
    Ignored,
}

impl Default for InvitationStatus {
    fn default() -> Self {
        InvitationStatus::Pending
    }
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Ignored => "ignored",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(InvitationStatus::Pending),
            "accepted" => Some(InvitationStatus::Accepted),
            "declined" => Some(InvitationStatus::Declined),
            "ignored" => Some(InvitationStatus::Ignored),
            _ => None,
        }
    }

    /// True for ACCEPTED, DECLINED and IGNORED
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }

    /// The allowed-transition table: only PENDING may move, and only to a
    /// terminal state.
    pub fn can_transition_to(&self, next: InvitationStatus) -> bool {
        matches!(self, InvitationStatus::Pending) && next.is_terminal()
    }
}

impl TryFrom<String> for InvitationStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s).ok_or_else(|| format!("unknown invitation status: {}", s))
    }
}

/// The three ways an invitee may resolve a pending invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationAction {
    Accept,
    Decline,
    Ignore,
}

impl InvitationAction {
    /// The terminal status this action resolves the invitation to
    pub fn resulting_status(&self) -> InvitationStatus {
        match self {
            InvitationAction::Accept => InvitationStatus::Accepted,
            InvitationAction::Decline => InvitationStatus::Declined,
            InvitationAction::Ignore => InvitationStatus::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            InvitationStatus::Pending,
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
            InvitationStatus::Ignored,
        ] {
            assert_eq!(InvitationStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(InvitationStatus::from_str("garbage"), None);
    }

    #[test]
    fn test_pending_is_the_only_mobile_state() {
        let terminal = [
            InvitationStatus::Accepted,
            InvitationStatus::Declined,
            InvitationStatus::Ignored,
        ];
        for next in terminal {
            assert!(InvitationStatus::Pending.can_transition_to(next));
        }
        for from in terminal {
            for next in terminal {
                assert!(!from.can_transition_to(next));
            }
            assert!(!from.can_transition_to(InvitationStatus::Pending));
        }
        // No self-loop back into pending either.
        assert!(!InvitationStatus::Pending.can_transition_to(InvitationStatus::Pending));
    }

    #[test]
    fn test_action_resolves_to_matching_status() {
        assert_eq!(
            InvitationAction::Accept.resulting_status(),
            InvitationStatus::Accepted
        );
        assert_eq!(
            InvitationAction::Decline.resulting_status(),
            InvitationStatus::Declined
        );
        assert_eq!(
            InvitationAction::Ignore.resulting_status(),
            InvitationStatus::Ignored
        );
    }

    #[test]
    fn test_permission_parsing() {
        assert_eq!(Permission::from_str("EDIT"), Some(Permission::Edit));
        assert_eq!(Permission::from_str("view"), Some(Permission::View));
        assert_eq!(Permission::from_str("owner"), None);
    }
}

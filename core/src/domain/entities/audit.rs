//! Security event entity for the audit trail.
//!
//! Events are emitted by the session services and handed to an external
//! sink; they are the only place where rejection kinds stay distinguishable
//! after the API boundary has collapsed them into one opaque response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::DeviceInfo;

/// Kinds of security events emitted by the session subsystem
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityEventKind {
    /// A new chain was created at login
    SessionIssued,

    /// A refresh token was successfully rotated
    TokenRotated,

    /// A rotation attempt was rejected (expired, invalid, or stale)
    RotationRejected,

    /// An already-consumed refresh secret was presented again
    ReuseDetected,

    /// A single record was revoked (logout)
    SessionRevoked,

    /// A whole chain was revoked (device removal or reuse response)
    FamilyRevoked,
}

impl SecurityEventKind {
    /// String representation for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionIssued => "SESSION_ISSUED",
            Self::TokenRotated => "TOKEN_ROTATED",
            Self::RotationRejected => "ROTATION_REJECTED",
            Self::ReuseDetected => "REUSE_DETECTED",
            Self::SessionRevoked => "SESSION_REVOKED",
            Self::FamilyRevoked => "FAMILY_REVOKED",
        }
    }
}

/// A single entry in the append-only security audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// Event kind
    pub kind: SecurityEventKind,

    /// Principal the event concerns
    pub user_id: Uuid,

    /// Rotation chain involved, if any
    pub family_id: Option<Uuid>,

    /// Refresh-token record involved, if any
    pub token_id: Option<Uuid>,

    /// Device metadata from the triggering request
    pub device: DeviceInfo,

    /// Free-form detail (e.g. the rejection reason)
    pub detail: Option<String>,

    /// Timestamp when the event occurred
    pub created_at: DateTime<Utc>,
}

impl SecurityEvent {
    /// Creates a new event for a principal
    pub fn new(kind: SecurityEventKind, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user_id,
            family_id: None,
            token_id: None,
            device: DeviceInfo::default(),
            detail: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_family(mut self, family_id: Uuid) -> Self {
        self.family_id = Some(family_id);
        self
    }

    pub fn with_token(mut self, token_id: Uuid) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.device = device;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_builder() {
        let user_id = Uuid::new_v4();
        let family_id = Uuid::new_v4();
        let event = SecurityEvent::new(SecurityEventKind::ReuseDetected, user_id)
            .with_family(family_id)
            .with_detail("revoked secret presented again");

        assert_eq!(event.kind, SecurityEventKind::ReuseDetected);
        assert_eq!(event.user_id, user_id);
        assert_eq!(event.family_id, Some(family_id));
        assert!(event.token_id.is_none());
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(SecurityEventKind::ReuseDetected.as_str(), "REUSE_DETECTED");
        assert_eq!(SecurityEventKind::FamilyRevoked.as_str(), "FAMILY_REVOKED");
    }
}

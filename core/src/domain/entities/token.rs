//! Token entities: access-token claims and the persisted refresh-token record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for the JWT access-token payload
///
/// Access tokens are stateless: they are verified by signature and expiry
/// alone and are never looked up in the store, so they cannot be revoked
/// individually before they expire. The short TTL bounds that window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,

    /// Role claim, carried opaquely for downstream authorization
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(
        user_id: Uuid,
        role: impl Into<String>,
        ttl_seconds: i64,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_seconds);

        Self {
            sub: user_id.to_string(),
            role: role.into(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: issuer.into(),
            aud: audience.into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the principal ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Device metadata captured when a refresh token is created or rotated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// User agent string of the client
    pub user_agent: Option<String>,

    /// Source address of the request
    pub ip_address: Option<String>,

    /// Client-supplied device identifier, if any
    pub device_id: Option<String>,
}

/// Refresh token record as persisted in the store
///
/// Records sharing a `family_id` form a rotation chain: the record created
/// at login has no `parent_hash`, and every successor carries the
/// `secret_hash` of the record it replaced. The raw secret itself is never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Principal this token belongs to
    pub user_id: Uuid,

    /// Role claim to mint into successor access tokens
    pub role: String,

    /// Salted one-way hash of the raw token secret (PHC string)
    pub secret_hash: String,

    /// Rotation chain this record belongs to; constant across rotations
    pub family_id: Uuid,

    /// `secret_hash` of the predecessor record, None for the chain head
    pub parent_hash: Option<String>,

    /// Device metadata captured at creation
    pub device: DeviceInfo,

    /// Optional friendly label for the session
    pub display_name: Option<String>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful rotation off this record
    pub last_used_at: Option<DateTime<Utc>>,

    /// Revocation timestamp; None means active. Set at most once, never reset.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Materializes an unsaved draft into a record, attaching the hashed secret
    pub fn from_draft(draft: SessionDraft, secret_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: draft.user_id,
            role: draft.role,
            secret_hash,
            family_id: draft.family_id,
            parent_hash: draft.parent_hash,
            device: draft.device,
            display_name: draft.display_name,
            created_at: draft.created_at,
            expires_at: draft.expires_at,
            last_used_at: None,
            revoked_at: None,
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Active means neither revoked nor expired
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}

/// Unsaved description of a refresh-token record, produced by the issuer
///
/// The draft holds everything except the secret hash; persisting it hashes
/// the raw secret and assigns the record ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub user_id: Uuid,
    pub role: String,
    pub family_id: Uuid,
    pub parent_hash: Option<String>,
    pub device: DeviceInfo,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

/// Read-only view of one active session (chain head), safe to show to users
///
/// Never carries the secret or its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Record ID of the current chain head; target for device revocation
    pub id: Uuid,

    /// Rotation chain identifier
    pub family_id: Uuid,

    /// Friendly label, if one was set at login
    pub display_name: Option<String>,

    /// Device metadata from the most recent rotation
    pub device: DeviceInfo,

    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl From<&RefreshToken> for SessionSummary {
    fn from(record: &RefreshToken) -> Self {
        Self {
            id: record.id,
            family_id: record.family_id,
            display_name: record.display_name.clone(),
            device: record.device.clone(),
            created_at: record.created_at,
            last_used_at: record.last_used_at,
            expires_at: record.expires_at,
        }
    }
}

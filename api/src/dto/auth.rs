//! DTOs for the auth endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dp_core::domain::entities::token::{SessionSummary, TokenPair};

/// Request body for POST /auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional friendly label for this session ("Work laptop")
    pub device_name: Option<String>,
    /// Optional client-supplied device identifier
    pub device_id: Option<String>,
}

/// Request body for POST /auth/refresh
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for POST /auth/logout
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            access_expires_in: pair.access_expires_in,
            refresh_expires_in: pair.refresh_expires_in,
        }
    }
}

/// Simple acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub message: String,
}

impl AckResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One active session as shown in the device list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceSessionDto {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

impl From<SessionSummary> for DeviceSessionDto {
    fn from(summary: SessionSummary) -> Self {
        Self {
            id: summary.id,
            display_name: summary.display_name,
            user_agent: summary.device.user_agent,
            ip_address: summary.device.ip_address,
            created_at: summary.created_at,
            last_used_at: summary.last_used_at,
            expires_at: summary.expires_at,
        }
    }
}

/// Response body for GET /auth/devices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceListResponse {
    pub sessions: Vec<DeviceSessionDto>,
}

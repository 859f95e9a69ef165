//! Token-related error taxonomy.
//!
//! The four rotation-rejection kinds (`InvalidRefreshToken`,
//! `RefreshTokenExpired`, `StaleRotation`, `ReuseDetected`) stay distinct
//! internally for logging and auditing, but the presentation layer must
//! collapse them into one opaque response so a caller cannot tell which
//! case occurred.

use thiserror::Error;

/// Token validation and rotation failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Rotation superseded by a concurrent refresh")]
    StaleRotation,

    #[error("Refresh token reuse detected")]
    ReuseDetected,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Whether this is one of the rotation-rejection kinds that the API
    /// boundary reports with a single opaque 401 response
    pub fn is_rotation_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidRefreshToken
                | Self::RefreshTokenExpired
                | Self::StaleRotation
                | Self::ReuseDetected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_rejection_kinds() {
        assert!(TokenError::InvalidRefreshToken.is_rotation_rejection());
        assert!(TokenError::RefreshTokenExpired.is_rotation_rejection());
        assert!(TokenError::StaleRotation.is_rotation_rejection());
        assert!(TokenError::ReuseDetected.is_rotation_rejection());
        assert!(!TokenError::TokenExpired.is_rotation_rejection());
        assert!(!TokenError::TokenGenerationFailed.is_rotation_rejection());
    }
}

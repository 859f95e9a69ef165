//! Mapping of domain errors to HTTP responses.
//!
//! Every rotation-rejection kind collapses to one opaque 401 body: the
//! wire must not reveal whether a presented refresh token was invalid,
//! expired, stale, or a detected reuse. The distinction survives only in
//! logs and the audit trail.

use actix_web::HttpResponse;
use tracing::{debug, error, warn};

use dp_core::errors::{DomainError, TokenError};
use dp_shared::types::ErrorBody;

/// Converts a domain error to its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) => handle_token_error(token_error),

        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorBody::new(
            "not_found",
            format!("{resource} not found"),
        )),

        DomainError::Unauthorized => HttpResponse::Unauthorized()
            .json(ErrorBody::new("unauthorized", "Authentication required")),

        // Infrastructure faults: server-side, retryable, never presented
        // as a credential verdict.
        DomainError::Hashing { .. } | DomainError::Storage { .. } | DomainError::Internal { .. } => {
            error!("internal error: {error}");
            HttpResponse::InternalServerError().json(ErrorBody::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    match error {
        // The four rotation-rejection kinds share one opaque response.
        // Log each distinctly; reuse is the one that matters.
        TokenError::ReuseDetected => {
            warn!("refresh rejected: reuse detected");
            opaque_invalid_token()
        }
        TokenError::InvalidRefreshToken
        | TokenError::RefreshTokenExpired
        | TokenError::StaleRotation => {
            debug!("refresh rejected: {error}");
            opaque_invalid_token()
        }

        TokenError::TokenExpired | TokenError::InvalidTokenFormat | TokenError::TokenNotYetValid => {
            HttpResponse::Unauthorized().json(ErrorBody::new(
                "unauthorized",
                "Access token is invalid or expired",
            ))
        }

        TokenError::TokenGenerationFailed => {
            error!("token generation failed");
            HttpResponse::InternalServerError().json(ErrorBody::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

/// The single body returned for every rejected refresh token
fn opaque_invalid_token() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorBody::new(
        "invalid_token",
        "Refresh token is invalid or expired",
    ))
}

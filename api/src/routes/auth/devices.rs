use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::auth::{AckResponse, DeviceListResponse, DeviceSessionDto};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use dp_core::repositories::TokenRepository;
use dp_core::services::auth::CredentialVerifier;

use super::AppState;

/// Handler for GET /auth/devices
///
/// Lists the caller's active sessions, one entry per rotation chain.
/// Requires a Bearer access token.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "sessions": [
///         {
///             "id": "550e8400-e29b-41d4-a716-446655440000",
///             "display_name": "Work laptop",
///             "user_agent": "Mozilla/5.0 ...",
///             "ip_address": "203.0.113.7",
///             "created_at": "2025-11-02T10:00:00Z",
///             "last_used_at": null,
///             "expires_at": "2025-11-09T10:00:00Z"
///         }
///     ]
/// }
/// ```
pub async fn list_devices<R, V>(
    state: web::Data<AppState<R, V>>,
    auth: AuthContext,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    match state.sessions.list_devices(auth.user_id).await {
        Ok(summaries) => HttpResponse::Ok().json(DeviceListResponse {
            sessions: summaries.into_iter().map(DeviceSessionDto::from).collect(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /auth/devices/{id}
///
/// Revokes the whole session chain behind one of the caller's devices.
/// The record must belong to the calling principal; foreign or unknown
/// IDs answer 404 without distinguishing the two.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Session revoked"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 404 Not Found: Record missing or owned by someone else
pub async fn revoke_device<R, V>(
    state: web::Data<AppState<R, V>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    match state
        .sessions
        .revoke_device(auth.user_id, path.into_inner())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(AckResponse::new("Session revoked")),
        Err(error) => handle_domain_error(&error),
    }
}

use actix_web::{web, HttpResponse};

use crate::dto::auth::{AckResponse, LogoutRequest};
use crate::handlers::error::handle_domain_error;

use dp_core::repositories::TokenRepository;
use dp_core::services::auth::CredentialVerifier;

use super::AppState;

/// Handler for POST /auth/logout
///
/// Revokes the presented refresh token. Idempotent: logging out an
/// unknown or already-revoked token still acknowledges.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "f3a9...c1.XyZ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out"
/// }
/// ```
pub async fn logout<R, V>(
    state: web::Data<AppState<R, V>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    match state.sessions.logout(&request.refresh_token).await {
        Ok(()) => HttpResponse::Ok().json(AckResponse::new("Logged out")),
        Err(error) => handle_domain_error(&error),
    }
}

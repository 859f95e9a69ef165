use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::{RefreshRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use dp_core::repositories::TokenRepository;
use dp_core::services::auth::CredentialVerifier;

use super::{device_info, AppState};

/// Handler for POST /auth/refresh
///
/// Rotates a refresh token: the presented token is consumed and a new
/// access/refresh pair is returned.
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
///     "access_token": "eyJ...",
///     "refresh_token": "f3a9...c1.AbC...",
///     "access_expires_in": 900,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: One opaque response for every rejected token,
///   whatever the internal reason
/// - 500 Internal Server Error: Hashing or storage failure
pub async fn refresh<R, V>(
    req: HttpRequest,
    state: web::Data<AppState<R, V>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    let device = device_info(&req, None);

    match state.sessions.refresh(&request.refresh_token, device).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}

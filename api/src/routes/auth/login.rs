use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use dp_core::repositories::TokenRepository;
use dp_core::services::auth::CredentialVerifier;
use dp_shared::types::ErrorBody;

use super::{device_info, AppState};

/// Handler for POST /auth/login
///
/// Verifies credentials through the external verifier, then opens a new
/// session chain for the principal.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "secret",
///     "device_name": "Work laptop"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "f3a9...c1.XyZ...",
///     "access_expires_in": 900,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Credentials rejected
/// - 500 Internal Server Error: Hashing or storage failure
pub async fn login<R, V>(
    req: HttpRequest,
    state: web::Data<AppState<R, V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    let identity = match state.verifier.verify(&request.email, &request.password).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(ErrorBody::new("invalid_credentials", "Invalid email or password"));
        }
        Err(error) => return handle_domain_error(&error),
    };

    let device = device_info(&req, request.device_id.clone());

    match state
        .sessions
        .login(identity, device, request.device_name.clone())
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}

//! Authentication route handlers
//!
//! Endpoints backed by the session subsystem:
//! - Login (new session chain)
//! - Token refresh (rotation)
//! - Logout (single-record revocation)
//! - Device management (listing and chain revocation)

pub mod devices;
pub mod login;
pub mod logout;
pub mod refresh;

use std::sync::Arc;

use actix_web::HttpRequest;

use dp_core::domain::entities::token::DeviceInfo;
use dp_core::repositories::TokenRepository;
use dp_core::services::auth::CredentialVerifier;
use dp_core::services::token::SessionService;

/// Application state shared by the auth handlers
pub struct AppState<R, V>
where
    R: TokenRepository,
    V: CredentialVerifier,
{
    pub sessions: Arc<SessionService<R>>,
    pub verifier: Arc<V>,
}

/// Collects device metadata from the incoming request
pub fn device_info(req: &HttpRequest, device_id: Option<String>) -> DeviceInfo {
    let user_agent = req
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let ip_address = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    DeviceInfo {
        user_agent,
        ip_address,
        device_id,
    }
}

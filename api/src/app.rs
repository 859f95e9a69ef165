//! Route configuration and service endpoints.

use actix_web::{web, HttpResponse};

use dp_core::repositories::TokenRepository;
use dp_core::services::auth::CredentialVerifier;
use dp_shared::types::ErrorBody;

use crate::routes::auth::{devices, login, logout, refresh};

/// Registers every route of the session API
///
/// The caller supplies `web::Data<AppState<R, V>>` and
/// `web::Data<TokenIssuer>` as app data before applying this
/// configuration.
pub fn configure<R, V>(cfg: &mut web::ServiceConfig)
where
    R: TokenRepository + 'static,
    V: CredentialVerifier + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/auth")
            .route("/login", web::post().to(login::login::<R, V>))
            .route("/refresh", web::post().to(refresh::refresh::<R, V>))
            .route("/logout", web::post().to(logout::logout::<R, V>))
            .route("/devices", web::get().to(devices::list_devices::<R, V>))
            .route(
                "/devices/{id}",
                web::delete().to(devices::revoke_device::<R, V>),
            ),
    );
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "datapulse-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("not_found", "Resource not found"))
}

//! Access-token authentication extractor.
//!
//! Endpoints that take an [`AuthContext`] parameter require a valid Bearer
//! access token; verification is signature + expiry only, with no store
//! lookup.

use actix_web::{
    error::ErrorUnauthorized, http::header::AUTHORIZATION, web, Error, FromRequest, HttpRequest,
};
use std::future::{ready, Ready};
use uuid::Uuid;

use dp_core::domain::entities::token::Claims;
use dp_core::services::token::TokenIssuer;

/// Authenticated principal context injected into handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Principal ID extracted from JWT claims
    pub user_id: Uuid,
    /// Role claim, carried opaquely
    pub role: String,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Result<Self, Error> {
        let user_id = claims
            .user_id()
            .map_err(|_| ErrorUnauthorized("Invalid token subject"))?;

        Ok(Self {
            user_id,
            role: claims.role,
            jti: claims.jti,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthContext, Error> {
    let issuer = req
        .app_data::<web::Data<TokenIssuer>>()
        .ok_or_else(|| ErrorUnauthorized("Token verification not configured"))?;

    let token =
        extract_bearer_token(req).ok_or_else(|| ErrorUnauthorized("Authentication required"))?;

    let claims = issuer
        .verify_access_token(&token)
        .map_err(|_| ErrorUnauthorized("Access token is invalid or expired"))?;

    AuthContext::from_claims(claims)
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(
            extract_bearer_token(&req),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}

//! Minting of access tokens and refresh secrets.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, DeviceInfo, SessionDraft};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Length of the raw refresh secret; 32 symbols over a 62-symbol alphabet
/// gives ~190 bits of entropy, comfortably past the 128-bit floor.
const REFRESH_SECRET_LEN: usize = 32;

/// Everything produced by one issuance: the signed access token, the raw
/// refresh secret (returned to the client exactly once), and the unsaved
/// record description the caller persists.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub refresh_secret: String,
    pub draft: SessionDraft,
}

/// Issues access/refresh credentials and verifies access tokens
///
/// Pure aside from randomness and clock reads; persistence is the caller's
/// concern.
#[derive(Clone)]
pub struct TokenIssuer {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Creates a new issuer from configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Mints a new access token plus refresh secret
    ///
    /// Omitting `family_id` starts a new rotation chain (login); passing
    /// one issues a successor within an existing chain (rotation), in
    /// which case `parent_hash` links it to its predecessor.
    pub fn issue(
        &self,
        user_id: Uuid,
        role: &str,
        family_id: Option<Uuid>,
        parent_hash: Option<String>,
        device: DeviceInfo,
        display_name: Option<String>,
    ) -> Result<IssuedSession, DomainError> {
        let now = Utc::now();
        let claims = Claims::new_access_token(
            user_id,
            role,
            self.config.access_token_expiry,
            self.config.issuer.as_str(),
            self.config.audience.as_str(),
        );
        let access_token = self.encode_jwt(&claims)?;
        let refresh_secret = generate_refresh_secret();

        let draft = SessionDraft {
            user_id,
            role: role.to_string(),
            family_id: family_id.unwrap_or_else(Uuid::new_v4),
            parent_hash,
            device,
            display_name,
            created_at: now,
            expires_at: now + Duration::seconds(self.config.refresh_token_expiry),
        };

        Ok(IssuedSession {
            access_token,
            refresh_secret,
            draft,
        })
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else if e.kind() == &jsonwebtoken::errors::ErrorKind::ImmatureSignature {
                    DomainError::Token(TokenError::TokenNotYetValid)
                } else {
                    DomainError::Token(TokenError::InvalidTokenFormat)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry(&self) -> i64 {
        self.config.access_token_expiry
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_token_expiry(&self) -> i64 {
        self.config.refresh_token_expiry
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

/// Generates a cryptographically random alphanumeric refresh secret
fn generate_refresh_secret() -> String {
    let mut rng = rand::thread_rng();
    (0..REFRESH_SECRET_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..10 => (b'0' + idx) as char,
                10..36 => (b'a' + idx - 10) as char,
                36..62 => (b'A' + idx - 36) as char,
                _ => unreachable!(),
            }
        })
        .collect()
}

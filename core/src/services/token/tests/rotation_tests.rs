//! Rotation state-machine tests: single use, reuse response, chain
//! integrity, concurrency, expiry, and isolation between chains.

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::audit::SecurityEventKind;
use crate::domain::entities::token::{DeviceInfo, RefreshToken, SessionDraft};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryTokenRepository, TokenRepository};
use crate::services::audit::AuditSink;
use crate::services::auth::VerifiedIdentity;
use crate::services::token::{
    RevocationService, RotationEngine, TokenIssuer, TokenServiceConfig, TokenStore,
};

use super::{fast_hasher, harness, wait_for_events};

fn identity() -> VerifiedIdentity {
    VerifiedIdentity {
        user_id: Uuid::new_v4(),
        role: "analyst".to_string(),
    }
}

fn device(name: &str) -> DeviceInfo {
    DeviceInfo {
        user_agent: Some(format!("{name}-agent")),
        ip_address: Some("203.0.113.7".to_string()),
        device_id: None,
    }
}

#[tokio::test]
async fn test_fresh_token_rotates_exactly_once() {
    let h = harness();
    let who = identity();

    let pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();

    // First rotation succeeds
    let rotated = h
        .service
        .refresh(&pair.refresh_token, device("laptop"))
        .await
        .unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);

    // Second rotation with the same raw secret must fail
    let second = h.service.refresh(&pair.refresh_token, device("laptop")).await;
    assert!(second.is_err());
}

#[tokio::test]
async fn test_reuse_revokes_the_whole_chain() {
    let h = harness();
    let who = identity();

    // login -> S0, rotate -> S1 (S0 now consumed)
    let s0 = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();
    let s1 = h
        .service
        .refresh(&s0.refresh_token, device("laptop"))
        .await
        .unwrap();

    // Presenting S0 again is reuse and takes the family down
    let reuse = h.service.refresh(&s0.refresh_token, device("laptop")).await;
    assert!(matches!(
        reuse,
        Err(DomainError::Token(TokenError::ReuseDetected))
    ));

    // S1 was collateral of the family revocation: dead, but it was never
    // consumed, so presenting it is not itself classified as reuse
    let s1_attempt = h.service.refresh(&s1.refresh_token, device("laptop")).await;
    assert!(matches!(
        s1_attempt,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    // Nothing is left active for this principal
    let active = h
        .repo
        .find_active_by_user(who.user_id, Utc::now())
        .await
        .unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_reuse_emits_security_event() {
    let h = harness();
    let who = identity();

    let s0 = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();
    h.service
        .refresh(&s0.refresh_token, device("laptop"))
        .await
        .unwrap();
    let _ = h.service.refresh(&s0.refresh_token, device("laptop")).await;

    // login + rotation + reuse + family revocation
    let events = wait_for_events(&h.audit_repo, 4).await;
    let reuse: Vec<_> = events
        .iter()
        .filter(|e| e.kind == SecurityEventKind::ReuseDetected)
        .collect();
    assert_eq!(reuse.len(), 1);
    assert_eq!(reuse[0].user_id, who.user_id);
    assert!(reuse[0].family_id.is_some());

    assert!(events
        .iter()
        .any(|e| e.kind == SecurityEventKind::FamilyRevoked));
}

#[tokio::test]
async fn test_chain_linkage_integrity() {
    let h = harness();
    let who = identity();

    let mut pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();
    for _ in 0..3 {
        pair = h
            .service
            .refresh(&pair.refresh_token, device("laptop"))
            .await
            .unwrap();
    }

    let mut records = h.repo.find_all_by_user(who.user_id).await.unwrap();
    assert_eq!(records.len(), 4);

    // One chain across all rotations
    let family_id = records[0].family_id;
    assert!(records.iter().all(|r| r.family_id == family_id));

    // Each record's parent_hash is its predecessor's secret_hash
    records.sort_by_key(|r| r.created_at);
    assert!(records[0].parent_hash.is_none());
    for window in records.windows(2) {
        assert_eq!(
            window[1].parent_hash.as_deref(),
            Some(window[0].secret_hash.as_str())
        );
    }

    // Everything but the head is consumed
    for record in &records[..3] {
        assert!(record.is_revoked());
        assert!(record.last_used_at.is_some());
    }
    assert!(records[3].is_active());
}

#[tokio::test]
async fn test_concurrent_rotation_single_winner() {
    let h = harness();
    let who = identity();

    let pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        h.service.refresh(&pair.refresh_token, device("laptop")),
        h.service.refresh(&pair.refresh_token, device("laptop")),
    );

    // Exactly one rotation wins; the loser sees the benign stale rejection,
    // never the reuse response
    let (winner, loser) = match (a, b) {
        (Ok(w), Err(l)) => (w, l),
        (Err(l), Ok(w)) => (w, l),
        (Ok(_), Ok(_)) => panic!("both concurrent rotations succeeded"),
        (Err(a), Err(b)) => panic!("both concurrent rotations failed: {a}, {b}"),
    };

    assert!(matches!(
        loser,
        DomainError::Token(TokenError::StaleRotation)
    ));

    // The winner's token remains rotatable
    h.service
        .refresh(&winner.refresh_token, device("laptop"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expired_record_rejected_even_when_unrevoked() {
    // Drive the engine directly with a hand-planted expired record
    let repo = Arc::new(InMemoryTokenRepository::new());
    let hasher = fast_hasher();
    let store = Arc::new(TokenStore::new(Arc::clone(&repo), hasher.clone()));
    let issuer = TokenIssuer::new(TokenServiceConfig::default());
    let revocation = RevocationService::new(Arc::clone(&store), AuditSink::disabled());
    let engine = RotationEngine::new(
        Arc::clone(&store),
        issuer,
        revocation,
        AuditSink::disabled(),
    );

    let user_id = Uuid::new_v4();
    let raw_secret = "expired-session-secret";
    let now = Utc::now();
    let record = RefreshToken::from_draft(
        SessionDraft {
            user_id,
            role: "analyst".to_string(),
            family_id: Uuid::new_v4(),
            parent_hash: None,
            device: DeviceInfo::default(),
            display_name: None,
            created_at: now - Duration::days(8),
            expires_at: now - Duration::days(1),
        },
        hasher.hash(raw_secret).await.unwrap(),
    );
    repo.save(record).await.unwrap();

    let result = engine.rotate(user_id, raw_secret, DeviceInfo::default()).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::RefreshTokenExpired))
    ));
}

#[tokio::test]
async fn test_unknown_secret_rejected_as_invalid() {
    let h = harness();
    let who = identity();
    h.service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();

    let forged = format!("{}.{}", who.user_id.simple(), "completely-wrong-secret");
    let result = h.service.refresh(&forged, device("laptop")).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_chains_are_isolated() {
    let h = harness();
    let who = identity();

    // Two devices, two chains
    let laptop = h
        .service
        .login(who.clone(), device("laptop"), Some("laptop".to_string()))
        .await
        .unwrap();
    let phone = h
        .service
        .login(who.clone(), device("phone"), Some("phone".to_string()))
        .await
        .unwrap();

    // Kill the laptop chain via reuse on it
    let rotated = h
        .service
        .refresh(&laptop.refresh_token, device("laptop"))
        .await
        .unwrap();
    let _ = h
        .service
        .refresh(&laptop.refresh_token, device("laptop"))
        .await;
    assert!(h
        .service
        .refresh(&rotated.refresh_token, device("laptop"))
        .await
        .is_err());

    // The phone chain keeps rotating untouched
    let phone_rotated = h
        .service
        .refresh(&phone.refresh_token, device("phone"))
        .await
        .unwrap();
    h.service
        .refresh(&phone_rotated.refresh_token, device("phone"))
        .await
        .unwrap();
}

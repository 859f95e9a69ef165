//! Session facade tests: login, wire-token handling, logout, and the
//! device view.

use chrono::Utc;
use uuid::Uuid;

use crate::errors::DomainError;
use crate::repositories::TokenRepository;
use crate::services::auth::VerifiedIdentity;
use crate::domain::entities::token::DeviceInfo;

use super::harness;

fn identity(role: &str) -> VerifiedIdentity {
    VerifiedIdentity {
        user_id: Uuid::new_v4(),
        role: role.to_string(),
    }
}

fn device(name: &str) -> DeviceInfo {
    DeviceInfo {
        user_agent: Some(format!("{name}-agent")),
        ip_address: Some("198.51.100.3".to_string()),
        device_id: Some(name.to_string()),
    }
}

#[tokio::test]
async fn test_login_issues_verifiable_pair() {
    let h = harness();
    let who = identity("admin");

    let pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();

    let claims = h.service.verify_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), who.user_id);
    assert_eq!(claims.role, "admin");

    assert_eq!(pair.access_expires_in, 900);
    assert_eq!(pair.refresh_expires_in, 604800);

    // Exactly one active record, a fresh chain head
    let records = h
        .repo
        .find_active_by_user(who.user_id, Utc::now())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].parent_hash.is_none());
    assert_eq!(records[0].role, "admin");
}

#[tokio::test]
async fn test_refresh_carries_role_forward() {
    let h = harness();
    let who = identity("viewer");

    let pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();
    let rotated = h
        .service
        .refresh(&pair.refresh_token, device("laptop"))
        .await
        .unwrap();

    let claims = h.service.verify_access_token(&rotated.access_token).unwrap();
    assert_eq!(claims.role, "viewer");
    assert_eq!(claims.user_id().unwrap(), who.user_id);
}

#[tokio::test]
async fn test_logout_revokes_presented_record() {
    let h = harness();
    let who = identity("analyst");

    let pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();
    h.service.logout(&pair.refresh_token).await.unwrap();

    // The logged-out token no longer rotates
    assert!(h
        .service
        .refresh(&pair.refresh_token, device("laptop"))
        .await
        .is_err());

    // And no active sessions remain
    let sessions = h.service.list_devices(who.user_id).await.unwrap();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let h = harness();
    let who = identity("analyst");

    let pair = h
        .service
        .login(who.clone(), device("laptop"), None)
        .await
        .unwrap();

    h.service.logout(&pair.refresh_token).await.unwrap();
    h.service.logout(&pair.refresh_token).await.unwrap();
    h.service.logout("garbage-token").await.unwrap();
}

#[tokio::test]
async fn test_device_list_one_entry_per_chain() {
    let h = harness();
    let who = identity("analyst");

    let laptop = h
        .service
        .login(who.clone(), device("laptop"), Some("Work laptop".to_string()))
        .await
        .unwrap();
    h.service
        .login(who.clone(), device("phone"), Some("Phone".to_string()))
        .await
        .unwrap();

    // Rotate the laptop chain twice; it must still appear once
    let rotated = h
        .service
        .refresh(&laptop.refresh_token, device("laptop"))
        .await
        .unwrap();
    h.service
        .refresh(&rotated.refresh_token, device("laptop"))
        .await
        .unwrap();

    let sessions = h.service.list_devices(who.user_id).await.unwrap();
    assert_eq!(sessions.len(), 2);

    let labels: Vec<_> = sessions
        .iter()
        .filter_map(|s| s.display_name.as_deref())
        .collect();
    assert!(labels.contains(&"Work laptop"));
    assert!(labels.contains(&"Phone"));

    // The laptop entry is the chain head (latest record), with last_used
    // still unset on the head itself
    let laptop_entry = sessions
        .iter()
        .find(|s| s.display_name.as_deref() == Some("Work laptop"))
        .unwrap();
    assert!(laptop_entry.last_used_at.is_none());
}

#[tokio::test]
async fn test_revoke_device_requires_ownership() {
    let h = harness();
    let owner = identity("analyst");
    let stranger = identity("analyst");

    h.service
        .login(owner.clone(), device("laptop"), None)
        .await
        .unwrap();
    let sessions = h.service.list_devices(owner.user_id).await.unwrap();
    let target = sessions[0].id;

    // A different principal cannot revoke it and cannot learn it exists
    let foreign = h.service.revoke_device(stranger.user_id, target).await;
    assert!(matches!(foreign, Err(DomainError::NotFound { .. })));

    // The owner can
    let revoked = h.service.revoke_device(owner.user_id, target).await.unwrap();
    assert_eq!(revoked, 1);
    assert!(h.service.list_devices(owner.user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_revoke_device_kills_whole_chain() {
    let h = harness();
    let who = identity("analyst");

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

    let rotated = h
        .service
        .refresh(&laptop.refresh_token, device("laptop"))
        .await
        .unwrap();

    let laptop_head = h
        .service
        .list_devices(who.user_id)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.display_name.as_deref() == Some("laptop"))
        .unwrap();

    h.service
        .revoke_device(who.user_id, laptop_head.id)
        .await
        .unwrap();

    // The whole laptop chain is dead, including its current head
    assert!(h
        .service
        .refresh(&rotated.refresh_token, device("laptop"))
        .await
        .is_err());

    // The phone chain is untouched
    h.service
        .refresh(&phone.refresh_token, device("phone"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_successor_inherits_display_name() {
    let h = harness();
    let who = identity("analyst");

    let pair = h
        .service
        .login(who.clone(), device("laptop"), Some("Work laptop".to_string()))
        .await
        .unwrap();
    h.service
        .refresh(&pair.refresh_token, device("laptop"))
        .await
        .unwrap();

    let sessions = h.service.list_devices(who.user_id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].display_name.as_deref(), Some("Work laptop"));
}

//! Token repository trait defining the interface for refresh-token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence operations
///
/// Implementations hold only hashed secret material; raw secrets never
/// reach this layer. Because digests are salted, lookups by secret are not
/// possible here; callers fetch a principal's candidate records and verify
/// against each.
///
/// # Concurrency contract
/// `mark_revoked` is the load-bearing primitive of the whole subsystem:
/// it must be a single indivisible conditional write (compare-and-set on
/// `revoked_at IS NULL`), and its return value must say whether *this*
/// call performed the transition. Splitting it into a read followed by a
/// write reintroduces the double-rotation race.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new refresh-token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g. duplicate ID)
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a record by its ID, regardless of lifecycle state
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError>;

    /// Find a principal's active records: `revoked_at` unset and
    /// `expires_at` after `now`
    async fn find_active_by_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefreshToken>, DomainError>;

    /// Find all of a principal's records including revoked and expired
    /// ones; used only for reuse forensics
    async fn find_all_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Atomically set `revoked_at` if and only if it is currently unset
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the transition
    /// * `Ok(false)` - The record was already revoked (or does not exist)
    /// * `Err(DomainError)` - Storage error
    async fn mark_revoked(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Revoke every currently-active record in a rotation chain
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records this call revoked
    async fn revoke_family(&self, family_id: Uuid, at: DateTime<Utc>)
        -> Result<usize, DomainError>;

    /// Stamp `last_used_at` on a record
    async fn update_last_used(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Physically delete records whose `expires_at` lies before `cutoff`
    ///
    /// Only the retention sweep calls this; request-path lookups never
    /// delete.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}

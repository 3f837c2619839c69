//! Store port abstraction for account persistence adapters.
//!
//! Handlers depend on this trait behind an `Arc` so tests can substitute an
//! isolated store per run instead of sharing process-wide state.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Account, ProfileUpdate};

/// Failures raised by store adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No account exists under the requested identifier.
    #[error("no account exists for this user id")]
    NotFound,
}

/// Port for the process-lifetime account table.
///
/// Mutations must be atomic with respect to one another for the same
/// identifier; reads may run concurrently but never observe a half-written
/// record.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert the account unless its identifier is already taken.
    ///
    /// Returns `false` and performs no mutation when the identifier exists.
    async fn insert_if_absent(&self, account: Account) -> bool;

    /// Look up an account by identifier.
    async fn find(&self, user_id: &str) -> Option<Account>;

    /// Overwrite only the supplied profile fields, all-or-nothing.
    ///
    /// Fields arrive pre-validated; the only failure is an absent record.
    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Account, StoreError>;

    /// Remove the account under the given identifier.
    async fn remove(&self, user_id: &str) -> Result<(), StoreError>;
}

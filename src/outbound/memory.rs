//! In-memory account store.
//!
//! A `RwLock`-guarded map keyed by identifier. State lives for the process
//! lifetime only; nothing survives a restart.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{AccountStore, StoreError};
use crate::domain::{Account, Comment, Nickname, ProfileUpdate, Secret, UserId, UserIdPolicy};

/// Fixture account present before any request is processed.
const SEED_USER_ID: &str = "TaroYamada";
const SEED_SECRET: &str = "PaSSwd4TY";
const SEED_NICKNAME: &str = "たろー";
const SEED_COMMENT: &str = "僕は元気です";

/// Process-lifetime account table.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    /// Empty store, used by tests that want full control over contents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the fixture account.
    pub fn seeded() -> Self {
        let store = Self::new();
        let seeded = store.insert_sync(seed_account());
        debug_assert!(seeded, "seed account inserted into an empty store");
        store
    }

    fn insert_sync(&self, account: Account) -> bool {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let key = account.user_id().as_str().to_owned();
        if accounts.contains_key(&key) {
            return false;
        }
        accounts.insert(key, account);
        true
    }
}

fn seed_account() -> Account {
    // Fixture values are compile-time constants; failing loudly here beats
    // starting a server without its documented test account.
    let user_id = match UserId::parse(SEED_USER_ID, UserIdPolicy::default()) {
        Ok(id) => id,
        Err(err) => panic!("seed user id must satisfy validation: {err}"),
    };
    let secret = match Secret::parse(SEED_SECRET) {
        Ok(secret) => secret,
        Err(err) => panic!("seed secret must satisfy validation: {err}"),
    };
    let nickname = match Nickname::parse(SEED_NICKNAME) {
        Ok(nickname) => nickname,
        Err(err) => panic!("seed nickname must satisfy validation: {err}"),
    };
    let comment = match Comment::parse(SEED_COMMENT) {
        Ok(comment) => comment,
        Err(err) => panic!("seed comment must satisfy validation: {err}"),
    };
    Account::new(user_id, secret).with_profile(nickname, comment)
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert_if_absent(&self, account: Account) -> bool {
        self.insert_sync(account)
    }

    async fn find(&self, user_id: &str) -> Option<Account> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts.get(user_id).cloned()
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<Account, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let account = accounts.get_mut(user_id).ok_or(StoreError::NotFound)?;
        account.apply(update);
        Ok(account.clone())
    }

    async fn remove(&self, user_id: &str) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        accounts.remove(user_id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(user_id: &str, secret: &str) -> Account {
        let user_id =
            UserId::parse(user_id, UserIdPolicy::default()).expect("test id is valid");
        let secret = Secret::parse(secret).expect("test secret is valid");
        Account::new(user_id, secret)
    }

    #[tokio::test]
    async fn seeded_store_contains_the_fixture_account() {
        let store = InMemoryAccountStore::seeded();
        let fixture = store.find(SEED_USER_ID).await.expect("fixture present");
        assert_eq!(fixture.nickname(), SEED_NICKNAME);
        assert_eq!(fixture.comment(), SEED_COMMENT);
        assert!(fixture.secret_matches(SEED_SECRET));
    }

    #[tokio::test]
    async fn duplicate_insert_leaves_the_original_untouched() {
        let store = InMemoryAccountStore::new();
        assert!(store.insert_if_absent(account("abcdef12", "Secret1!")).await);

        let update = ProfileUpdate {
            nickname: Some(Nickname::parse("First").expect("valid")),
            comment: None,
        };
        store
            .update_profile("abcdef12", update)
            .await
            .expect("record exists");

        assert!(!store.insert_if_absent(account("abcdef12", "Other99!")).await);
        let current = store.find("abcdef12").await.expect("record exists");
        assert_eq!(current.nickname(), "First");
        assert!(current.secret_matches("Secret1!"));
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let store = InMemoryAccountStore::new();
        store.insert_if_absent(account("abcdef12", "Secret1!")).await;

        let updated = store
            .update_profile(
                "abcdef12",
                ProfileUpdate {
                    nickname: None,
                    comment: Some(Comment::parse("still here").expect("valid")),
                },
            )
            .await
            .expect("record exists");
        assert_eq!(updated.nickname(), "abcdef12");
        assert_eq!(updated.comment(), "still here");
    }

    #[tokio::test]
    async fn update_of_absent_record_reports_not_found() {
        let store = InMemoryAccountStore::new();
        let err = store
            .update_profile("nobody99", ProfileUpdate::default())
            .await
            .expect_err("absent record");
        assert_eq!(err, StoreError::NotFound);
    }

    #[tokio::test]
    async fn removed_accounts_stay_gone() {
        let store = InMemoryAccountStore::new();
        store.insert_if_absent(account("abcdef12", "Secret1!")).await;
        store.remove("abcdef12").await.expect("record exists");

        assert!(store.find("abcdef12").await.is_none());
        assert_eq!(
            store.remove("abcdef12").await.expect_err("already gone"),
            StoreError::NotFound
        );
        // The identifier is free for re-registration.
        assert!(store.insert_if_absent(account("abcdef12", "Other99!")).await);
    }
}

use crate::core::error::StoreError;
use crate::models::account::Account;
use dashmap::DashMap;

/// In-memory account table
///
/// Accounts are keyed by id. A secondary index maps email to the first
/// account registered with it, which is the one login resolves to.
pub struct AccountStore {
    accounts: DashMap<String, Account>,
    by_email: DashMap<String, String>,
}

impl AccountStore {
    /// Create a new AccountStore instance
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            by_email: DashMap::new(),
        }
    }

    /// Add an account to the table
    /// Duplicate emails are accepted; the earliest account keeps the email index
    pub fn insert(&self, account: Account) {
        self.by_email
            .entry(account.email.clone())
            .or_insert_with(|| account.id.clone());
        self.accounts.insert(account.id.clone(), account);
    }

    /// Get a snapshot of an account by id
    pub fn get(&self, id: &str) -> Option<Account> {
        self.accounts.get(id).map(|entry| entry.value().clone())
    }

    /// Get a snapshot of the account login should use for `email`
    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        let id = self.by_email.get(email).map(|entry| entry.value().clone())?;
        self.get(&id)
    }

    /// Check the limit and debit it in one step
    ///
    /// The entry stays locked from the check through `persist`, so two
    /// concurrent borrows cannot both spend the same purchase power.
    /// `persist` receives the remaining purchase power; if it fails the
    /// account is left untouched. Returns the remaining purchase power.
    ///
    /// `persist` runs with the shard write lock held, so signups and reads
    /// of other accounts on the same shard wait behind the WAL write.
    pub fn debit_purchase_power<F>(&self, id: &str, amount: f64, persist: F) -> Result<f64, StoreError>
    where
        F: FnOnce(f64) -> anyhow::Result<()>,
    {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let account = entry.value_mut();
        if amount > account.purchase_power {
            return Err(StoreError::InsufficientPurchasePower {
                requested: amount,
                available: account.purchase_power,
            });
        }

        let remaining = account.purchase_power - amount;
        persist(remaining).map_err(|e| StoreError::Persistence(format!("{:#}", e)))?;

        account.purchase_power = remaining;
        Ok(remaining)
    }

    /// Overwrite the purchase power without checks (log replay)
    pub fn set_purchase_power(&self, id: &str, purchase_power: f64) -> Result<(), StoreError> {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.value_mut().purchase_power = purchase_power;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::AccountStatus;
    use chrono::{NaiveDate, Utc};
    use std::sync::Arc;

    fn account(id: &str, email: &str, purchase_power: f64) -> Account {
        Account {
            id: id.to_string(),
            phone: "555-0100".to_string(),
            email: email.to_string(),
            name: "Test".to_string(),
            registration_date: Utc::now(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            monthly_salary: purchase_power / 2.0,
            status: AccountStatus::Approved,
            password_hash: "hash".to_string(),
            purchase_power,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = AccountStore::new();
        assert!(store.is_empty());

        store.insert(account("a1", "a@example.com", 1000.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a1").unwrap().email, "a@example.com");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_find_by_email_prefers_first_registration() {
        let store = AccountStore::new();
        store.insert(account("first", "dup@example.com", 1000.0));
        store.insert(account("second", "dup@example.com", 2000.0));

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_email("dup@example.com").unwrap().id, "first");
        assert!(store.find_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_debit_within_limit() {
        let store = AccountStore::new();
        store.insert(account("a1", "a@example.com", 60_000.0));

        let remaining = store.debit_purchase_power("a1", 1000.0, |_| Ok(())).unwrap();

        assert_eq!(remaining, 59_000.0);
        assert_eq!(store.get("a1").unwrap().purchase_power, 59_000.0);
    }

    #[test]
    fn test_debit_exact_limit() {
        let store = AccountStore::new();
        store.insert(account("a1", "a@example.com", 500.0));

        assert_eq!(store.debit_purchase_power("a1", 500.0, |_| Ok(())).unwrap(), 0.0);
    }

    #[test]
    fn test_debit_over_limit_leaves_balance() {
        let store = AccountStore::new();
        store.insert(account("a1", "a@example.com", 500.0));

        let err = store.debit_purchase_power("a1", 500.01, |_| Ok(())).unwrap_err();

        assert_eq!(
            err,
            StoreError::InsufficientPurchasePower {
                requested: 500.01,
                available: 500.0
            }
        );
        assert_eq!(store.get("a1").unwrap().purchase_power, 500.0);
    }

    #[test]
    fn test_debit_unknown_account() {
        let store = AccountStore::new();
        assert_eq!(
            store.debit_purchase_power("ghost", 1.0, |_| Ok(())),
            Err(StoreError::NotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_concurrent_debits_never_overdraw() {
        let store = Arc::new(AccountStore::new());
        store.insert(account("a1", "a@example.com", 1000.0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.debit_purchase_power("a1", 100.0, |_| Ok(())).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 10);
        assert_eq!(store.get("a1").unwrap().purchase_power, 0.0);
    }

    #[test]
    fn test_failed_persist_leaves_balance() {
        let store = AccountStore::new();
        store.insert(account("a1", "a@example.com", 1000.0));

        let err = store
            .debit_purchase_power("a1", 100.0, |_| Err(anyhow::anyhow!("disk full")))
            .unwrap_err();

        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(store.get("a1").unwrap().purchase_power, 1000.0);
    }

    #[test]
    fn test_persist_sees_remaining_balance() {
        let store = AccountStore::new();
        store.insert(account("a1", "a@example.com", 1000.0));

        let mut seen = None;
        store
            .debit_purchase_power("a1", 400.0, |remaining| {
                seen = Some(remaining);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, Some(600.0));
    }

    #[test]
    fn test_set_purchase_power() {
        let store = AccountStore::new();
        store.insert(account("a1", "a@example.com", 1000.0));

        store.set_purchase_power("a1", 250.0).unwrap();

        assert_eq!(store.get("a1").unwrap().purchase_power, 250.0);
        assert!(store.set_purchase_power("ghost", 1.0).is_err());
    }
}

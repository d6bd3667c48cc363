use crate::core::rate::{ApiRateSnapshot, Rate};
use crate::core::storage::{API_RATES_KEY, KeyValueStore, LOCAL_RATES_KEY};
use anyhow::{Context, Result};
use tracing::debug;

/// Owns the local rate overrides and the cached API snapshot.
///
/// Every mutation is written through to the backing store before returning.
/// Uniqueness of codes is not checked here.
pub struct RateStore<S: KeyValueStore> {
    storage: S,
    local_rates: Vec<Rate>,
}

impl<S: KeyValueStore> RateStore<S> {
    /// Loads local overrides from `storage`. A missing or unreadable entry
    /// starts the store empty.
    pub fn new(storage: S) -> Self {
        let local_rates: Vec<Rate> = storage.get_item(LOCAL_RATES_KEY).unwrap_or_default();
        debug!(count = local_rates.len(), "Loaded local rates");
        Self {
            storage,
            local_rates,
        }
    }

    pub fn local_rates(&self) -> &[Rate] {
        &self.local_rates
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add_rate(&mut self, rate: Rate) -> Result<()> {
        debug!(%rate, "Adding local rate");
        self.local_rates.push(rate);
        self.save()
    }

    /// Sets the value of the first rate with `code`. Returns false, writing
    /// nothing, when there is no such rate.
    pub fn update_rate(&mut self, code: &str, new_value: Option<f64>) -> Result<bool> {
        let Some(rate) = self.local_rates.iter_mut().find(|r| r.code == code) else {
            debug!(code, "No local rate to update");
            return Ok(false);
        };
        rate.value = new_value;
        self.save()?;
        Ok(true)
    }

    /// Removes every rate with `code` and persists the rest. Returns whether
    /// anything was removed.
    pub fn delete_rate(&mut self, code: &str) -> Result<bool> {
        let before = self.local_rates.len();
        self.local_rates.retain(|r| r.code != code);
        self.save()?;
        Ok(self.local_rates.len() != before)
    }

    /// Empties the overrides and drops the stored key entirely.
    pub fn reset_local_rates(&mut self) -> Result<()> {
        self.local_rates.clear();
        self.storage
            .remove_item(LOCAL_RATES_KEY)
            .context("Failed to reset local rates")
    }

    pub fn set_api_rates(&self, snapshot: &ApiRateSnapshot) -> Result<()> {
        self.storage
            .set_item(API_RATES_KEY, snapshot)
            .context("Failed to cache API rates")
    }

    pub fn api_rates(&self) -> Option<ApiRateSnapshot> {
        self.storage.get_item(API_RATES_KEY)
    }

    /// Wipes everything in the backing store, snapshot included.
    pub fn purge(&mut self) -> Result<()> {
        self.local_rates.clear();
        self.storage.clear().context("Failed to clear storage")
    }

    fn save(&self) -> Result<()> {
        self.storage
            .set_item(LOCAL_RATES_KEY, &self.local_rates)
            .context("Failed to save local rates")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store_with(rates: &[Rate]) -> (RateStore<MemoryStore>, MemoryStore) {
        let storage = MemoryStore::new();
        storage.set_item(LOCAL_RATES_KEY, rates).unwrap();
        (RateStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_load_from_storage() {
        let (store, _) = store_with(&[Rate::new("USD", 1.0)]);
        assert_eq!(store.local_rates(), &[Rate::new("USD", 1.0)]);
    }

    #[test]
    fn test_load_missing_or_unreadable_is_empty() {
        let store = RateStore::new(MemoryStore::new());
        assert!(store.local_rates().is_empty());

        let storage = MemoryStore::new();
        storage.set_raw(LOCAL_RATES_KEY, "not json");
        assert!(RateStore::new(storage).local_rates().is_empty());
    }

    #[test]
    fn test_add_rate_persists() {
        let (mut store, storage) = store_with(&[]);

        store.add_rate(Rate::new("EUR", 0.85)).unwrap();

        let matching: Vec<_> = store
            .local_rates()
            .iter()
            .filter(|r| r.code == "EUR")
            .collect();
        assert_eq!(matching, vec![&Rate::new("EUR", 0.85)]);
        assert_eq!(
            storage.get_item::<Vec<Rate>>(LOCAL_RATES_KEY),
            Some(vec![Rate::new("EUR", 0.85)])
        );
    }

    #[test]
    fn test_add_rate_does_not_check_duplicates() {
        let (mut store, _) = store_with(&[Rate::new("EUR", 0.85)]);
        store.add_rate(Rate::new("EUR", 0.9)).unwrap();
        assert_eq!(store.local_rates().len(), 2);
    }

    #[test]
    fn test_update_rate() {
        let (mut store, storage) = store_with(&[Rate::new("USD", 1.0), Rate::new("EUR", 0.85)]);

        assert!(store.update_rate("EUR", Some(0.9)).unwrap());

        let expected = vec![Rate::new("USD", 1.0), Rate::new("EUR", 0.9)];
        assert_eq!(store.local_rates(), expected.as_slice());
        assert_eq!(storage.get_item::<Vec<Rate>>(LOCAL_RATES_KEY), Some(expected));
    }

    #[test]
    fn test_update_absent_rate_is_noop() {
        let (mut store, storage) = store_with(&[Rate::new("USD", 1.0)]);
        storage.remove_item(LOCAL_RATES_KEY).unwrap();

        assert!(!store.update_rate("GBP", Some(0.75)).unwrap());
        assert_eq!(store.local_rates(), &[Rate::new("USD", 1.0)]);
        // Nothing was written
        assert!(!storage.contains_key(LOCAL_RATES_KEY));
    }

    #[test]
    fn test_delete_rate_removes_all_matches() {
        let (mut store, storage) = store_with(&[
            Rate::new("USD", 1.0),
            Rate::new("EUR", 0.85),
            Rate::new("USD", 1.1),
        ]);

        assert!(store.delete_rate("USD").unwrap());

        assert_eq!(store.local_rates(), &[Rate::new("EUR", 0.85)]);
        assert_eq!(
            storage.get_item::<Vec<Rate>>(LOCAL_RATES_KEY),
            Some(vec![Rate::new("EUR", 0.85)])
        );
    }

    #[test]
    fn test_delete_absent_rate_is_idempotent() {
        let (mut store, _) = store_with(&[Rate::new("USD", 1.0)]);

        assert!(!store.delete_rate("GBP").unwrap());
        assert!(!store.delete_rate("GBP").unwrap());

        assert_eq!(store.local_rates(), &[Rate::new("USD", 1.0)]);
    }

    #[test]
    fn test_reset_removes_key() {
        let (mut store, storage) = store_with(&[Rate::new("USD", 1.0), Rate::new("EUR", 0.85)]);

        store.reset_local_rates().unwrap();

        assert!(store.local_rates().is_empty());
        assert!(!storage.contains_key(LOCAL_RATES_KEY));
    }

    #[test]
    fn test_api_rates_cache_is_independent() {
        let (mut store, _) = store_with(&[Rate::new("MXN", 20.0)]);
        assert!(store.api_rates().is_none());

        let snapshot = ApiRateSnapshot::from([("USD", 1.0), ("EUR", 0.9)]);
        store.set_api_rates(&snapshot).unwrap();
        store.reset_local_rates().unwrap();

        assert_eq!(store.api_rates(), Some(snapshot));

        // Replaced wholesale
        let newer = ApiRateSnapshot::from([("GBP", 0.75)]);
        store.set_api_rates(&newer).unwrap();
        assert_eq!(store.api_rates(), Some(newer));
    }

    #[test]
    fn test_purge() {
        let (mut store, storage) = store_with(&[Rate::new("MXN", 20.0)]);
        store
            .set_api_rates(&ApiRateSnapshot::from([("USD", 1.0)]))
            .unwrap();

        store.purge().unwrap();

        assert!(store.local_rates().is_empty());
        assert!(store.api_rates().is_none());
        assert!(!storage.contains_key(LOCAL_RATES_KEY));
    }
}

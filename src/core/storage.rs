//! Key/value persistence abstraction

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

/// Key holding the user's local rate overrides.
pub const LOCAL_RATES_KEY: &str = "localRates";
/// Key holding the last snapshot fetched from the rates API.
pub const API_RATES_KEY: &str = "apiRates";

/// A persistent string-keyed store. Values are stored as JSON.
///
/// Reads never fail: a missing key and a value that no longer deserializes into
/// the requested type both read back as `None`.
pub trait KeyValueStore: Send + Sync {
    fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T>;

    fn set_item<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>;

    /// Removing a key that does not exist is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Removes every key in the store.
    fn clear(&self) -> Result<()>;
}

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, error, warn};

use super::clock::{Clock, SystemClock};
use crate::storage::Storage;

/// Time-to-live for cache entries, in milliseconds. `Ttl::NEVER` means
/// entries are written without an expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ttl(Option<i64>);

impl Ttl {
    pub const NEVER: Ttl = Ttl(None);

    /// Zero and negative values mean "never expire"
    pub fn from_millis(millis: i64) -> Self {
        if millis > 0 {
            Ttl(Some(millis))
        } else {
            Ttl::NEVER
        }
    }

    /// Parse a ttl from configuration text. Anything that is not a finite,
    /// positive number (including the empty string) means "never expire".
    /// Fractional milliseconds round up.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(millis) if millis.is_finite() && millis > 0.0 => {
                Ttl::from_millis(millis.ceil() as i64)
            }
            _ => Ttl::NEVER,
        }
    }

    pub fn millis(&self) -> Option<i64> {
        self.0
    }

    pub fn is_never(&self) -> bool {
        self.0.is_none()
    }
}

/// The persisted shape of a cache entry. `expiry` is Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem<T> {
    pub value: T,
    pub expiry: Option<i64>,
}

impl<T> StoredItem<T> {
    /// An entry is live while now <= expiry
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        matches!(self.expiry, Some(expiry) if now_millis > expiry)
    }
}

/// Typed key-value cache over a `Storage`.
/// Clone is cheap - the storage and clock are shared.
#[derive(Clone)]
pub struct LocalCache {
    storage: Arc<dyn Storage>,
    ttl: Ttl,
    clock: Arc<dyn Clock>,
}

impl LocalCache {
    pub fn new(storage: Arc<dyn Storage>, ttl: Ttl) -> Self {
        Self::with_clock(storage, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn Storage>, ttl: Ttl, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Store `value` under `key`, stamped with `now + ttl`.
    /// Failures are logged, never returned.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let expiry = self
            .ttl
            .millis()
            .map(|ttl| self.clock.now_millis().saturating_add(ttl));
        let item = StoredItem { value, expiry };

        let serialized = match serde_json::to_string(&item) {
            Ok(s) => s,
            Err(e) => {
                error!(key = key, error = %e, "Failed to serialize cache item");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(key, &serialized) {
            error!(key = key, error = %e, "Failed to write cache item");
        }
    }

    /// Read the value under `key`.
    ///
    /// Returns `None` when the key is missing, expired, or does not decode
    /// as a `StoredItem<T>`; expired and undecodable entries are removed.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                warn!(key = key, error = %e, "Failed to read cache item");
                return None;
            }
        };

        let item: StoredItem<T> = match serde_json::from_str(&raw) {
            Ok(item) => item,
            Err(e) => {
                warn!(key = key, error = %e, "Discarding malformed cache item");
                self.remove(key);
                return None;
            }
        };

        if item.is_expired_at(self.clock.now_millis()) {
            debug!(key = key, expiry = ?item.expiry, "Cache item expired");
            self.remove(key);
            return None;
        }

        Some(item.value)
    }

    /// Whether a live entry exists under `key`. Purges like `get`.
    pub fn contains(&self, key: &str) -> bool {
        self.get::<serde_json::Value>(key).is_some()
    }

    /// Remove `key`. Failures are logged, never returned.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            error!(key = key, error = %e, "Failed to remove cache item");
        }
    }
}

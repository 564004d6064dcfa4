//! Local caching module with time-to-live expiry.
//!
//! This module provides the `LocalCache` for storing typed values in a
//! `Storage` as `{value, expiry}` JSON blobs. Entries past their expiry, and
//! entries that no longer decode, are purged on read.
//!
//! Cache writes never fail from the caller's point of view: storage errors
//! are logged and swallowed.

pub mod clock;
pub mod local;

pub use clock::{Clock, ManualClock, SystemClock};
pub use local::{LocalCache, StoredItem, Ttl};

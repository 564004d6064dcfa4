//! Core library for the order-bot client.
//!
//! The pieces, leaf to root:
//! - `storage`: persistent key-value blobs (in-memory or one file per key)
//! - `cache`: typed values over a storage with optional time-to-live expiry
//! - `auth`: the credential view over the cache and the auth payloads
//! - `router`: route table and the navigation guard
//! - `api`: the fetch wrapper with strict and tolerant-auth policies, plus
//!   the menu and auth endpoints built on it
//!
//! Storage and navigation are injected, so everything here runs without a
//! browser or a real backend.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod router;
pub mod storage;

pub use api::{ApiClient, ApiError, ApiResponse, CallOptions, FetchMode, ResponseClass};
pub use auth::{AuthTokens, LoginOutcome, SessionStore, SignupOutcome};
pub use cache::{Clock, LocalCache, ManualClock, SystemClock, Ttl};
pub use config::Config;
pub use models::MenuItemPayload;
pub use router::{GuardDecision, Location, Navigator, Route, RouteError, RouteTable, Router};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

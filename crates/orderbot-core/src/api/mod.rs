//! REST API client module for the order-bot backend.
//!
//! This module provides the `ApiClient`, a single fetch entry point with two
//! failure policies selected per call by `FetchMode`:
//!
//! - `Strict`: any non-2xx is an error; a 401 also evicts the stored
//!   credential and navigates to login when a navigator is attached
//! - `TolerantAuth`: 401 and 409 come back as ordinary responses so the
//!   caller can handle "please log in" and "already exists" itself
//!
//! The menu and auth endpoints are built on top of it.

pub mod auth;
pub mod client;
pub mod error;
pub mod menu;
pub mod options;
pub mod response;

pub use reqwest::{Method, StatusCode};

pub use client::ApiClient;
pub use error::ApiError;
pub use options::{CallOptions, FetchMode};
pub use response::{ApiResponse, ResponseClass};

//! Authentication module for managing the stored credential.
//!
//! This module provides:
//! - `SessionStore`: the access/refresh tokens kept in the local cache
//! - the login, signup and logout payloads exchanged with the backend
//!
//! Presence of an access token is what "logged in" means; the token itself
//! is opaque to the client.

pub mod credentials;
pub mod session;

pub use credentials::{
    AuthTokens, LoginOutcome, LoginRequest, LogoutRequest, SignupOutcome, SignupRequest,
};
pub use session::{SessionStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

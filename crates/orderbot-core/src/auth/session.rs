use crate::cache::LocalCache;

use super::AuthTokens;

/// Cache key holding the bearer token
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Cache key holding the refresh token used by logout
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// The credential view over the local cache.
/// Clone is cheap - it shares the underlying storage.
#[derive(Clone)]
pub struct SessionStore {
    cache: LocalCache,
}

impl SessionStore {
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Get the bearer token if one is stored and not expired
    pub fn token(&self) -> Option<String> {
        self.cache.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.cache.get(REFRESH_TOKEN_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) {
        self.cache.set(ACCESS_TOKEN_KEY, &token);
    }

    /// Store tokens from a login or signup response
    pub fn store(&self, tokens: &AuthTokens) {
        self.set_token(&tokens.access_token);
        match tokens.refresh_token {
            Some(ref refresh) => self.cache.set(REFRESH_TOKEN_KEY, refresh),
            None => self.cache.remove(REFRESH_TOKEN_KEY),
        }
    }

    /// Forget the stored credential
    pub fn clear(&self) {
        self.cache.remove(ACCESS_TOKEN_KEY);
        self.cache.remove(REFRESH_TOKEN_KEY);
    }
}

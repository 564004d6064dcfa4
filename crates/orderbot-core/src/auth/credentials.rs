use serde::{Deserialize, Serialize};

/// Tokens returned by the backend on login and signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub bot_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn(AuthTokens),
    /// Backend answered 401
    InvalidCredentials,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Created(AuthTokens),
    /// Backend answered 409: the account exists, log in instead
    AlreadyExists,
    /// Backend answered 401
    Unauthorized,
}

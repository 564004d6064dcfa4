//! Owner authentication endpoints.
//!
//! Login and signup run in tolerant-auth mode: a 401 or 409 is an answer
//! the form has to show, not an expired session.

use reqwest::Method;
use tracing::{debug, info};

use crate::auth::{
    AuthTokens, LoginOutcome, LoginRequest, LogoutRequest, SignupOutcome, SignupRequest,
};

use super::{ApiClient, ApiError, ApiResponse, CallOptions, FetchMode, ResponseClass};

const AUTH_LOGIN_PATH: &str = "/auth/login";
const AUTH_SIGNUP_PATH: &str = "/auth/signup";
const AUTH_LOGOUT_PATH: &str = "/auth/logout";

const LOGIN_FAILED: &str = "Failed to log in";
const SIGNUP_FAILED: &str = "Failed to create account";
const LOGOUT_FAILED: &str = "Failed to log out";

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let options = CallOptions::new(LOGIN_FAILED)
            .method(Method::POST)
            .mode(FetchMode::TolerantAuth)
            .wrap_req(false)
            .body(LoginRequest { email, password });
        let response = self.fetch(AUTH_LOGIN_PATH, options).await?;

        match response.class() {
            ResponseClass::Success => {
                let tokens = self.store_tokens(&response)?;
                info!("Login successful");
                Ok(LoginOutcome::LoggedIn(tokens))
            }
            ResponseClass::AuthExpired => Ok(LoginOutcome::InvalidCredentials),
            _ => Err(Self::unexpected(response, LOGIN_FAILED)),
        }
    }

    /// Create an owner account together with its bot
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        bot_name: &str,
    ) -> Result<SignupOutcome, ApiError> {
        let options = CallOptions::new(SIGNUP_FAILED)
            .method(Method::POST)
            .mode(FetchMode::TolerantAuth)
            .wrap_req(false)
            .body(SignupRequest {
                email,
                password,
                bot_name,
            });
        let response = self.fetch(AUTH_SIGNUP_PATH, options).await?;

        match response.class() {
            ResponseClass::Success => {
                let tokens = self.store_tokens(&response)?;
                info!("Signup successful");
                Ok(SignupOutcome::Created(tokens))
            }
            ResponseClass::Conflict => Ok(SignupOutcome::AlreadyExists),
            ResponseClass::AuthExpired => Ok(SignupOutcome::Unauthorized),
            ResponseClass::Failure => Err(Self::unexpected(response, SIGNUP_FAILED)),
        }
    }

    /// Revoke the refresh token and forget the local session.
    ///
    /// The local session is cleared even when the backend call fails; that
    /// failure is still returned.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let refresh_token = self.session().and_then(|s| s.refresh_token());

        let result = match refresh_token {
            Some(ref refresh_token) => {
                let options = CallOptions::new(LOGOUT_FAILED)
                    .method(Method::POST)
                    .token(self.stored_token())
                    .wrap_req(false)
                    .body(LogoutRequest { refresh_token });
                self.fetch(AUTH_LOGOUT_PATH, options).await.map(|_| ())
            }
            None => {
                debug!("No refresh token stored, skipping backend logout");
                Ok(())
            }
        };

        if let Some(session) = self.session() {
            session.clear();
        }
        result
    }

    fn store_tokens(&self, response: &ApiResponse) -> Result<AuthTokens, ApiError> {
        let tokens: AuthTokens = response.json()?;
        if let Some(session) = self.session() {
            session.store(&tokens);
        }
        Ok(tokens)
    }

    /// A tolerated status this endpoint has no answer for
    fn unexpected(response: ApiResponse, message: &str) -> ApiError {
        ApiError::Request {
            status: response.status(),
            message: message.to_string(),
            body: ApiError::truncate_body(response.text()),
        }
    }
}

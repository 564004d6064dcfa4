//! API client for communicating with the order-bot REST API.
//!
//! This module provides the `ApiClient` struct: one `call` entry point that
//! builds the request, reads the whole response, and applies the failure
//! policy chosen by the call's `FetchMode`.

use std::sync::Arc;

use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::auth::SessionStore;
use crate::config::Config;
use crate::router::Navigator;

use super::{ApiError, ApiResponse, CallOptions, FetchMode, ResponseClass};

/// Request body envelope: `{"req": <body>}`
#[derive(Serialize)]
struct Envelope<'a, B> {
    req: &'a B,
}

/// API client for the order-bot backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Option<SessionStore>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClient {
    /// Create a client against `config.api_base`, with no session and no
    /// navigator attached
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.api_base.clone(),
            session: None,
            navigator: None,
        })
    }

    /// Attach the credential store. Strict-mode 401s evict from it and the
    /// endpoint helpers read the bearer token from it.
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    /// Attach a navigator. Only then does a strict-mode 401 redirect to login.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&SessionStore> {
        self.session.as_ref()
    }

    pub(crate) fn stored_token(&self) -> Option<String> {
        self.session.as_ref().and_then(|s| s.token())
    }

    /// `call` against the configured base URL
    pub async fn fetch<B: Serialize>(
        &self,
        path: &str,
        options: CallOptions<B>,
    ) -> Result<ApiResponse, ApiError> {
        self.call(&self.base_url, path, options).await
    }

    /// Issue a request to `base_path + path`.
    ///
    /// Returns the response when it is 2xx, or when it is 401/409 in
    /// tolerant-auth mode. Everything else is an error carrying
    /// `options.err_msg`.
    pub async fn call<B: Serialize>(
        &self,
        base_path: &str,
        path: &str,
        options: CallOptions<B>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", base_path, path);
        debug!(method = %options.method, url = %url, mode = ?options.mode, "API request");

        let headers = Self::build_headers(options.token.as_deref(), &options.headers)?;
        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = Self::encode_body(options.body.as_ref(), options.wrap_req)? {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|source| {
            warn!(url = %url, error = %source, "API request failed to send");
            ApiError::Transport {
                message: options.err_msg.clone(),
                source,
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| {
            warn!(url = %url, error = %source, "Failed to read API response body");
            ApiError::Transport {
                message: options.err_msg.clone(),
                source,
            }
        })?;
        debug!(url = %url, status = status.as_u16(), "API response");

        self.apply_policy(ApiResponse::new(status, body), options.mode, options.err_msg)
    }

    fn build_headers(
        token: Option<&str>,
        extra: &[(String, String)],
    ) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                ApiError::InvalidHeader {
                    name: header::AUTHORIZATION.to_string(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }

        // Caller headers win over the defaults above
        for (name, value) in extra {
            let invalid = |reason: String| ApiError::InvalidHeader {
                name: name.clone(),
                reason,
            };
            let header_name = header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| invalid(e.to_string()))?;
            let header_value =
                header::HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn encode_body<B: Serialize>(body: Option<&B>, wrap: bool) -> Result<Option<String>, ApiError> {
        body.map(|body| {
            if wrap {
                serde_json::to_string(&Envelope { req: body })
            } else {
                serde_json::to_string(body)
            }
        })
        .transpose()
        .map_err(ApiError::Encode)
    }

    fn apply_policy(
        &self,
        response: ApiResponse,
        mode: FetchMode,
        err_msg: String,
    ) -> Result<ApiResponse, ApiError> {
        match (response.class(), mode) {
            (ResponseClass::Success, _) => Ok(response),
            (ResponseClass::AuthExpired | ResponseClass::Conflict, FetchMode::TolerantAuth) => {
                Ok(response)
            }
            (ResponseClass::AuthExpired, FetchMode::Strict) => {
                self.handle_auth_expired();
                Err(ApiError::AuthExpired { message: err_msg })
            }
            _ => {
                let body = ApiError::truncate_body(response.text());
                warn!(status = response.status().as_u16(), body = %body, "API request rejected");
                Err(ApiError::Request {
                    status: response.status(),
                    message: err_msg,
                    body,
                })
            }
        }
    }

    /// Evict the credential, then send the user to login with the current
    /// location as `redirect`. Each step only runs when its dependency is
    /// attached.
    fn handle_auth_expired(&self) {
        if let Some(ref session) = self.session {
            session.clear();
            info!("Stored credential evicted after 401");
        }

        if let Some(ref navigator) = self.navigator {
            let current = navigator.current_location();
            let login = navigator.login_location();
            let target = if current.path == login.path {
                login
            } else {
                login.with_query("redirect", current.to_string())
            };
            info!(to = %target, "Redirecting to login after 401");
            navigator.navigate(target);
        }
    }
}

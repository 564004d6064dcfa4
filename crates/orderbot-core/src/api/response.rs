use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::ApiError;

/// What a status code means to the client. Computed from the status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    AuthExpired,
    Conflict,
    Failure,
}

impl ResponseClass {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            200..=299 => ResponseClass::Success,
            401 => ResponseClass::AuthExpired,
            409 => ResponseClass::Conflict,
            _ => ResponseClass::Failure,
        }
    }
}

/// A fully read response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    class: ResponseClass,
    body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: String) -> Self {
        Self {
            status,
            class: ResponseClass::from_status(status),
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn class(&self) -> ResponseClass {
        self.class
    }

    pub fn is_success(&self) -> bool {
        self.class == ResponseClass::Success
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Decode)
    }
}

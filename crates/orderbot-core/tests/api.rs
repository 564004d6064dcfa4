//! End-to-end tests of the API client against the in-process mock backend.

mod common;

use reqwest::Method;
use serde_json::json;

use common::{
    harness, MockBackend, BROKEN_REFRESH_TOKEN, EXPIRED_TOKEN, GOOD_PASSWORD, GOOD_TOKEN,
    TAKEN_EMAIL,
};
use orderbot_core::auth::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use orderbot_core::storage::Storage;
use orderbot_core::{
    ApiClient, ApiError, AuthTokens, CallOptions, Config, FetchMode, Location, LoginOutcome,
    MenuItemPayload, ResponseClass, SignupOutcome,
};

#[tokio::test]
async fn fetch_menu_items_returns_backend_array() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(GOOD_TOKEN);

    let items = h.api.fetch_menu_items().await.unwrap();
    assert_eq!(
        items,
        vec![MenuItemPayload {
            name: "Tea".to_string(),
            price: 3.0,
            status: "active".to_string(),
        }]
    );

    let request = backend.last_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/menu-items");
    assert_eq!(request.authorization.as_deref(), Some("Bearer good-token"));
    assert_eq!(request.body, "");
}

#[tokio::test]
async fn save_menu_items_sends_raw_body() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(GOOD_TOKEN);

    let items = vec![
        MenuItemPayload {
            name: "Tea".to_string(),
            price: 3.0,
            status: "active".to_string(),
        },
        MenuItemPayload {
            name: "Scone".to_string(),
            price: 4.5,
            status: "inactive".to_string(),
        },
    ];
    h.api.save_menu_items(&items).await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        request.json_body(),
        json!({"menuItems": [
            {"name": "Tea", "price": 3.0, "status": "active"},
            {"name": "Scone", "price": 4.5, "status": "inactive"},
        ]})
    );
}

#[tokio::test]
async fn strict_401_evicts_credential_and_redirects_to_login() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(EXPIRED_TOKEN);
    h.router.push_path("/b/app").unwrap();

    let err = h.api.fetch_menu_items().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(err.to_string(), "Failed to load menu items");

    assert!(!h.storage.contains_key(ACCESS_TOKEN_KEY));
    assert_eq!(
        h.router.current(),
        Location::new("/b/login").with_query("redirect", "/b/app")
    );
}

#[tokio::test]
async fn strict_401_on_login_page_does_not_redirect_to_itself() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(EXPIRED_TOKEN);
    h.router.push_path("/b/login?x=1").unwrap();

    let err = h.api.fetch_menu_items().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert!(!h.session.is_logged_in());
    assert_eq!(h.router.current(), Location::new("/b/login"));
}

#[tokio::test]
async fn strict_401_without_navigator_does_not_redirect() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(EXPIRED_TOKEN);
    h.router.push_path("/c").unwrap();

    // Same session, no navigation handle
    let bare = ApiClient::new(&Config {
        api_base: backend.base_url.clone(),
        ..Config::default()
    })
    .unwrap()
    .with_session(h.session.clone());

    let err = bare.fetch_menu_items().await.unwrap_err();
    assert!(err.is_auth_expired());
    assert!(!h.session.is_logged_in());
    assert_eq!(h.router.current(), Location::new("/c"));
}

#[tokio::test]
async fn bare_client_only_raises() {
    let backend = MockBackend::spawn().await;
    let bare = ApiClient::new(&Config::default()).unwrap();

    let err = bare
        .call(&backend.base_url, "/status/401", CallOptions::new("nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired { ref message } if message == "nope"));
}

#[tokio::test]
async fn tolerant_401_and_409_return_plain_responses() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(GOOD_TOKEN);
    h.router.push_path("/b/app").unwrap();

    for (code, class) in [(401, ResponseClass::AuthExpired), (409, ResponseClass::Conflict)] {
        let options = CallOptions::new("should not raise")
            .method(Method::POST)
            .mode(FetchMode::TolerantAuth);
        let response = h.api.fetch(&format!("/status/{}", code), options).await.unwrap();
        assert_eq!(response.status().as_u16(), code);
        assert_eq!(response.class(), class);
        assert_eq!(response.json::<serde_json::Value>().unwrap(), json!({"status": code}));
    }

    // No side effects
    assert_eq!(h.session.token().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(h.router.current(), Location::new("/b/app"));
}

#[tokio::test]
async fn strict_409_is_an_error() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(GOOD_TOKEN);

    let err = h
        .api
        .fetch("/status/409", CallOptions::new("Conflict!"))
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(409));
    assert_eq!(err.to_string(), "Conflict!");
    assert!(h.session.is_logged_in());
}

#[tokio::test]
async fn status_500_raises_caller_message_in_both_modes() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(GOOD_TOKEN);

    for mode in [FetchMode::Strict, FetchMode::TolerantAuth] {
        let options = CallOptions::new("Something went wrong").mode(mode);
        let err = h.api.fetch("/status/500", options).await.unwrap_err();
        match err {
            ApiError::Request {
                status,
                ref message,
                ref body,
            } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(message, "Something went wrong");
                assert!(body.contains("500"));
            }
            other => panic!("expected Request error, got {:?}", other),
        }
    }
    assert!(h.session.is_logged_in());
}

#[tokio::test]
async fn request_shape_defaults() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);

    let options = CallOptions::new("x")
        .token(Some("t-1".to_string()))
        .header("X-Trace", "abc")
        .body(json!({"name": "Tea"}));
    h.api.fetch("/status/200", options).await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.authorization.as_deref(), Some("Bearer t-1"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.headers["x-trace"], "abc");
    assert_eq!(request.json_body(), json!({"req": {"name": "Tea"}}));

    let options = CallOptions::new("x").wrap_req(false).body(json!({"name": "Tea"}));
    h.api.fetch("/status/204", options).await.unwrap();
    let request = backend.last_request();
    assert_eq!(request.authorization, None);
    assert_eq!(request.json_body(), json!({"name": "Tea"}));
}

#[tokio::test]
async fn call_uses_given_base_path() {
    let backend = MockBackend::spawn().await;
    // Configured base points nowhere useful
    let h = harness("http://127.0.0.1:9");

    let response = h
        .api
        .call(&backend.base_url, "/status/201", CallOptions::new("x").method(Method::DELETE))
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(backend.last_request().method, "DELETE");
}

#[tokio::test]
async fn transport_failure_carries_caller_message() {
    // Nothing listens on the discard port
    let h = harness("http://127.0.0.1:9");
    h.session.set_token(GOOD_TOKEN);

    let err = h.api.fetch_menu_items().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.to_string(), "Failed to load menu items");
    assert!(h.session.is_logged_in());
}

#[tokio::test]
async fn login_stores_tokens() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);

    let outcome = h.api.login("owner@example.com", GOOD_PASSWORD).await.unwrap();
    assert_eq!(
        outcome,
        LoginOutcome::LoggedIn(AuthTokens {
            access_token: GOOD_TOKEN.to_string(),
            refresh_token: Some("refresh-1".to_string()),
        })
    );
    assert_eq!(h.session.token().as_deref(), Some(GOOD_TOKEN));
    assert_eq!(h.session.refresh_token().as_deref(), Some("refresh-1"));

    let request = backend.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.json_body(),
        json!({"email": "owner@example.com", "password": GOOD_PASSWORD})
    );
}

#[tokio::test]
async fn login_401_is_invalid_credentials_without_side_effects() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token("previous");
    h.router.push_path("/b/login").unwrap();

    let outcome = h.api.login("owner@example.com", "wrong").await.unwrap();
    assert_eq!(outcome, LoginOutcome::InvalidCredentials);
    assert_eq!(h.session.token().as_deref(), Some("previous"));
    assert_eq!(h.router.current(), Location::new("/b/login"));
}

#[tokio::test]
async fn signup_outcomes() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);

    let outcome = h.api.signup(TAKEN_EMAIL, "pw", "Cafe Bot").await.unwrap();
    assert_eq!(outcome, SignupOutcome::AlreadyExists);
    assert!(!h.session.is_logged_in());

    let outcome = h.api.signup("new@example.com", "pw", "Cafe Bot").await.unwrap();
    assert!(matches!(outcome, SignupOutcome::Created(_)));
    assert!(h.session.is_logged_in());
    assert_eq!(backend.last_request().json_body()["bot_name"], "Cafe Bot");
}

#[tokio::test]
async fn logout_revokes_and_clears() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.api.login("owner@example.com", GOOD_PASSWORD).await.unwrap();

    h.api.logout().await.unwrap();
    assert!(!h.storage.contains_key(ACCESS_TOKEN_KEY));
    assert!(!h.storage.contains_key(REFRESH_TOKEN_KEY));

    let request = backend.last_request();
    assert_eq!(request.path, "/auth/logout");
    assert_eq!(request.json_body(), json!({"refresh_token": "refresh-1"}));
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.store(&AuthTokens {
        access_token: GOOD_TOKEN.to_string(),
        refresh_token: Some(BROKEN_REFRESH_TOKEN.to_string()),
    });

    let err = h.api.logout().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to log out");
    assert!(!h.session.is_logged_in());
    assert_eq!(h.storage.get_item(REFRESH_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn logout_without_refresh_token_skips_backend() {
    let backend = MockBackend::spawn().await;
    let h = harness(&backend.base_url);
    h.session.set_token(GOOD_TOKEN);

    h.api.logout().await.unwrap();
    assert!(backend.requests().is_empty());
    assert!(!h.session.is_logged_in());
}

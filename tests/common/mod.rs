//! Common test utilities for integration tests
//!
//! The app under test runs over the in-memory user store, so no external
//! services are needed; the trait seam is the same one production wires
//! to Postgres.

use accounts_backend::{config::AppConfig, routes, state::AppState, store::InMemoryUserStore};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

/// Response captured from the test app
pub struct TestResponse {
    pub status: StatusCode,
    /// First `name=value` pair of the Set-Cookie header, if any
    pub session_cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

impl TestApp {
    /// Create a new test application over a fresh in-memory store
    pub fn new() -> Self {
        let state = AppState::new(Arc::new(InMemoryUserStore::new()), AppConfig::default());
        let app = routes::create_router(state);

        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send("GET", path, None, None).await
    }

    /// Make a GET request carrying a session cookie
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> TestResponse {
        self.send("GET", path, None, Some(cookie)).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, path: &str, body: &str) -> TestResponse {
        self.send("POST", path, Some(body), None).await
    }

    /// Make a POST request with a JSON body and a session cookie
    pub async fn post_with_cookie(&self, path: &str, body: &str, cookie: &str) -> TestResponse {
        self.send("POST", path, Some(body), Some(cookie)).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let session_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|pair| pair.to_string());

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();

        TestResponse {
            status,
            session_cookie,
            body,
        }
    }
}

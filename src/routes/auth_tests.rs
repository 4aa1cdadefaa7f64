//! Property-based tests for session authentication
//!
//! Whoami is only ever authenticated by a session cookie that the service
//! itself issued; anything else must read as not signed in.

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use crate::store::InMemoryUserStore;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use proptest::prelude::*;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Create a test app state over the in-memory store
    fn create_test_state() -> AppState {
        AppState::new(Arc::new(InMemoryUserStore::new()), AppConfig::default())
    }

    /// Generate cookie headers that were never issued by the service
    fn junk_cookie_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            // No cookie at all
            Just(None),
            // Empty session id
            Just(Some("sid=".to_string())),
            // Random non-uuid session ids
            "[a-zA-Z0-9]{1,40}".prop_map(|s| Some(format!("sid={}", s))),
            // Well-formed uuid that the store has never seen
            Just(Some(format!("sid={}", uuid::Uuid::nil()))),
            // Arbitrary cookie soup without a usable sid
            "[a-z]{1,8}=[a-z0-9]{1,12}".prop_map(Some),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: a session cookie the service never issued cannot
        /// authenticate whoami
        #[test]
        fn prop_unissued_session_cookie_never_authenticates(
            cookie in junk_cookie_strategy()
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let state = create_test_state();
                let app = create_router(state);

                let mut request_builder = Request::builder()
                    .uri("/api/v1/auth/whoami")
                    .method("GET");

                if let Some(cookie) = cookie {
                    request_builder = request_builder.header(header::COOKIE, cookie);
                }

                let request = request_builder.body(Body::empty()).unwrap();
                let response = app.oneshot(request).await.unwrap();

                prop_assert_eq!(
                    response.status(),
                    StatusCode::UNAUTHORIZED,
                    "expected 401 for a session the service never issued"
                );

                Ok(())
            })?;
        }
    }

    #[tokio::test]
    async fn test_whoami_without_cookie_returns_401() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/api/v1/auth/whoami")
            .method("GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_issues_a_session_cookie() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/api/v1/auth/signup")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"email":"user@example.com","password":"password123"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("signup should set a session cookie")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("sid="));
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email_format() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/api/v1/auth/signup")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"email":"not-an-email","password":"password123"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_signin_with_unknown_email_returns_404() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/api/v1/auth/signin")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"email":"missing@example.com","password":"password123"}"#,
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

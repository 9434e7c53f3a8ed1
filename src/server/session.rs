//! Session gate.
//!
//! A user's identity is the opaque `userId` cookie issued at registration.
//! The gate only checks that the cookie is present; the value is trusted as
//! is and never looked up in the users table.

use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use super::error::ApiError;

pub const SESSION_COOKIE: &str = "userId";

/// Session cookies live for 7 days and are never renewed.
pub const SESSION_MAX_AGE: Duration = Duration::days(7);

/// Identity of the caller, added to request extensions by [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(pub String);

/// Builds the cookie handed out on registration.
pub fn session_cookie(user_id: impl Into<String>) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, user_id.into()))
        .path("/")
        .max_age(SESSION_MAX_AGE)
        .build()
}

/// Rejects requests without a session cookie.
pub async fn require_session(
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            tracing::debug!(path = %request.uri().path(), "Rejected request without session");
            ApiError::Unauthorized
        })?;

    request.extensions_mut().insert(SessionUser(user_id));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::test_support::TestApp;
    use axum::http::{Method, StatusCode};

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc");

        assert_eq!(cookie.name(), "userId");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
    }

    #[tokio::test]
    async fn test_gated_routes_require_cookie() {
        let app = TestApp::new().await;
        let id = uuid::Uuid::new_v4();

        let routes = [
            (Method::GET, "/meals".to_string()),
            (Method::POST, "/meals".to_string()),
            (Method::GET, "/meals/metrics".to_string()),
            (Method::GET, format!("/meals/{}", id)),
            (Method::PUT, format!("/meals/{}", id)),
            (Method::DELETE, format!("/meals/{}", id)),
        ];

        for (method, uri) in routes {
            let response = app.send(method.clone(), &uri, None, None).await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
            assert_eq!(
                response.json(),
                serde_json::json!({ "error": "Unauthorized" })
            );
        }
    }

    #[tokio::test]
    async fn test_empty_cookie_rejected() {
        let app = TestApp::new().await;

        let response = app
            .send(Method::GET, "/meals", Some("userId="), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_identity_passes_gate() {
        let app = TestApp::new().await;

        let response = app
            .send(Method::GET, "/meals", Some("userId=someone-else"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json(), serde_json::json!([]));
    }
}

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::handlers::AppState;
use crate::model::AdminUser;
use crate::store::traits::{AuthGateway, Store};

/// Authenticated operator context, resolved on every admin route entry.
///
/// The bearer token is checked against the session cache first; a miss or
/// expired entry is revalidated with the auth service, so a sign-out that
/// happened elsewhere takes effect at the next request.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user: AdminUser,
    pub token: String,
}

/// Rejection pointing the client at the login screen.
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "Not authenticated",
                "redirect_to": "/admin/login",
            })),
        )
            .into_response()
    }
}

#[async_trait]
impl<S: Store + 'static> FromRequestParts<AppState<S>> for AdminContext {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthRedirect)?;

        if let Some(user) = state.sessions.get(&token).await {
            return Ok(AdminContext { user, token });
        }

        match state.auth.fetch_user(&token).await {
            Ok(Some(user)) => {
                state.sessions.put(&token, user.clone()).await;
                Ok(AdminContext { user, token })
            }
            Ok(None) => Err(AuthRedirect),
            Err(error) => {
                log::error!("Session check failed: {error:#}");
                Err(AuthRedirect)
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc-123"));
        assert_eq!(bearer_token(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::model::{AdminUser, Session};
use crate::store::traits::AuthGateway;

/// HTTP gateway to the hosted auth service. Credentials are exchanged for a
/// bearer token with a password grant; the token resolves back to its user
/// through the service's user endpoint.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: String,
}

impl From<AuthUser> for AdminUser {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl HttpAuthGateway {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/token?grant_type=password", self.endpoint);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to reach auth service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Sign-in rejected ({status}): {body}");
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("Malformed sign-in response")?;

        Ok(Session {
            access_token: token.access_token,
            user: token.user.into(),
        })
    }

    async fn fetch_user(&self, access_token: &str) -> Result<Option<AdminUser>> {
        let url = format!("{}/user", self.endpoint);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach auth service")?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Session lookup failed ({status}): {body}");
        }

        let user: AuthUser = response.json().await.context("Malformed user response")?;
        Ok(Some(user.into()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/logout", self.endpoint);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to reach auth service")?;

        if !response.status().is_success() {
            let status = response.status();
            bail!("Sign-out failed ({status})");
        }

        Ok(())
    }
}
